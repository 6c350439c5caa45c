//! Build errors for machine and transition builders.

use crate::runtime::MachineError;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Transition origin not specified. Call .from(state)")]
    MissingOrigin,

    #[error("Transition target not specified. Call .to(state)")]
    MissingTarget,

    #[error("Transition condition not specified. Call .when(..), .when_local(..) or .condition(..)")]
    MissingCondition,

    #[error(transparent)]
    Machine(#[from] MachineError),
}
