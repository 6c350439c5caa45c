//! The state machine runtime.
//!
//! # Key Concepts
//!
//! - **StateMachine**: owns states and the transition table, drives ticks
//! - **Blueprint**: the host's machine variant (data, init wiring, post-tick hook)
//! - **Transition**: an `origin -> target` edge guarded by a condition
//! - **Forced transition**: a buffered override applied on the next tick
//!
//! A tick commits at most one transition. A pending forced transition always
//! wins; otherwise the active state's transitions are scanned in
//! registration order unless the state is locked; otherwise the active state
//! is updated.

mod blueprint;
mod error;
mod machine;
mod naming;
mod transition;

pub use blueprint::Blueprint;
pub use error::{MachineError, Result};
pub use machine::{create_state_machine, ObserverId, StateMachine};
pub use naming::NamingConvention;
pub use transition::{TickOutcome, Transition};
