//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for creating state machines
//! with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Condition, StateId};
use crate::runtime::Transition;

/// Create a transition that fires whenever its origin is active and unlocked.
///
/// # Example
///
/// ```
/// use ticking_fsm::builder::always_transition;
/// use ticking_fsm::runtime::Transition;
///
/// let transition: Transition<()> = always_transition(1u8, 2u8);
/// assert!(transition.can_fire(&()));
/// ```
pub fn always_transition<M: 'static>(
    from: impl Into<StateId>,
    to: impl Into<StateId>,
) -> Transition<M> {
    Transition::new(from, to, Condition::always())
}

/// Create a transition guarded by a predicate on the machine's blueprint.
///
/// # Example
///
/// ```
/// use ticking_fsm::builder::guarded_transition;
///
/// struct Door {
///     open: bool,
/// }
///
/// let transition = guarded_transition(1u8, 2u8, |d: &Door| d.open);
/// assert!(transition.can_fire(&Door { open: true }));
/// assert!(!transition.can_fire(&Door { open: false }));
/// ```
pub fn guarded_transition<M, F>(
    from: impl Into<StateId>,
    to: impl Into<StateId>,
    guard: F,
) -> Transition<M>
where
    M: 'static,
    F: Fn(&M) -> bool + 'static,
{
    Transition::local(from, to, guard)
}
