//! Core state machine types.
//!
//! This module contains the building blocks the runtime is made of:
//! - State identities and machine identities
//! - The `State` trait and the node the machine keeps per state
//! - Conditions that guard transitions
//! - The transition log

mod condition;
mod history;
mod id;
mod state;

pub use condition::{Condition, ConditionOwner};
pub use history::{TransitionLog, TransitionRecord};
pub use id::{MachineId, StateId};
pub use state::{State, StateControl, StateNode};
