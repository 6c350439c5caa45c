//! Runtime errors.

use crate::core::StateId;
use thiserror::Error;

/// Convenient result alias for machine operations.
pub type Result<T> = std::result::Result<T, MachineError>;

/// Errors reported by registration calls and by `tick`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("invalid state identity 0 passed to {operation}")]
    InvalidIdentity { operation: &'static str },

    #[error("state {id} is not registered")]
    UnknownState { id: StateId },

    #[error("state machine ticked before init()")]
    NotInitialized,

    #[error("no condition named '{name}' on this machine")]
    UnboundCondition { name: String },

    #[error("condition owner for transition {origin} -> {target} was dropped before registration")]
    ConditionOwnerDropped { origin: StateId, target: StateId },

    #[error("{len} state names exceed the state identity range")]
    NameTableTooLarge { len: usize },
}

impl MachineError {
    pub(crate) fn invalid_identity(operation: &'static str) -> Self {
        MachineError::InvalidIdentity { operation }
    }
}
