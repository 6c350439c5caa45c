//! Registered transitions and tick results.

use crate::core::{Condition, StateId};
use std::fmt;

/// A directed edge `origin -> target` guarded by a condition.
///
/// Transitions are evaluated only while `origin` is the active state, in the
/// order they were registered for that origin.
pub struct Transition<M> {
    pub origin: StateId,
    pub target: StateId,
    pub condition: Condition<M>,
}

impl<M: 'static> Transition<M> {
    pub fn new(origin: impl Into<StateId>, target: impl Into<StateId>, condition: Condition<M>) -> Self {
        Self {
            origin: origin.into(),
            target: target.into(),
            condition,
        }
    }

    /// Transition whose condition reads the machine's blueprint.
    pub fn local<F>(origin: impl Into<StateId>, target: impl Into<StateId>, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + 'static,
    {
        Self::new(origin, target, Condition::local(predicate))
    }
}

impl<M> Transition<M> {
    /// Whether the guard currently holds.
    pub fn can_fire(&self, model: &M) -> bool {
        self.condition.check(model)
    }
}

impl<M> fmt::Debug for Transition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("origin", &self.origin)
            .field("target", &self.target)
            .field("condition", &self.condition)
            .finish()
    }
}

/// What a single tick did. Exactly one of these happens per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A pending forced transition was committed
    Forced { from: StateId, to: StateId },

    /// A conditional transition of the active state was committed
    Transitioned { from: StateId, to: StateId },

    /// No transition; the active state was updated
    Updated(StateId),

    /// No active state
    Idle,
}

impl TickOutcome {
    pub fn committed(&self) -> bool {
        matches!(self, Self::Forced { .. } | Self::Transitioned { .. })
    }

    /// Active state after the tick, `NONE` when idle.
    pub fn active(&self) -> StateId {
        match *self {
            Self::Forced { to, .. } | Self::Transitioned { to, .. } => to,
            Self::Updated(id) => id,
            Self::Idle => StateId::NONE,
        }
    }
}
