//! Configuration violations.

use crate::core::StateId;
use thiserror::Error;

/// Problems found in a machine's transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("transitions registered from unregistered state {origin}")]
    DanglingOrigin { origin: StateId },

    #[error("transition {origin} -> {target} targets an unregistered state")]
    DanglingTarget { origin: StateId, target: StateId },

    #[error("condition owner of transition {origin} -> {target} has been dropped")]
    OrphanedCondition { origin: StateId, target: StateId },
}
