//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Condition, StateId};
use crate::runtime::Transition;
use std::rc::Rc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<M> {
    from: Option<StateId>,
    to: Option<StateId>,
    condition: Option<Condition<M>>,
}

impl<M: 'static> TransitionBuilder<M> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            condition: None,
        }
    }

    /// Set the origin state (required).
    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Guard with a condition on the machine's blueprint.
    pub fn when_local<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + 'static,
    {
        self.condition = Some(Condition::local(predicate));
        self
    }

    /// Guard with a condition read from a host object held weakly.
    pub fn when_sourced<T, F>(mut self, owner: &Rc<T>, predicate: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> bool + 'static,
    {
        self.condition = Some(Condition::sourced(owner, predicate));
        self
    }

    /// Guard with a self-contained closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.condition = Some(Condition::from_fn(predicate));
        self
    }

    /// Guard with a prepared condition.
    pub fn condition(mut self, condition: Condition<M>) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Fire whenever the origin is active and unlocked.
    pub fn always(self) -> Self {
        self.condition(Condition::always())
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<M>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingOrigin)?;
        let to = self.to.ok_or(BuildError::MissingTarget)?;
        let condition = self.condition.ok_or(BuildError::MissingCondition)?;

        Ok(Transition::new(from, to, condition))
    }
}

impl<M: 'static> Default for TransitionBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Tank {
        fuel: u32,
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<Tank>::new().from(1u8).build();
        assert!(matches!(result, Err(BuildError::MissingTarget)));

        let result = TransitionBuilder::<Tank>::new().to(2u8).build();
        assert!(matches!(result, Err(BuildError::MissingOrigin)));
    }

    #[test]
    fn builder_validates_missing_condition() {
        let result = TransitionBuilder::<Tank>::new().from(1u8).to(2u8).build();
        assert!(matches!(result, Err(BuildError::MissingCondition)));
    }

    #[test]
    fn local_guard_reads_model() {
        let transition = TransitionBuilder::new()
            .from(1u8)
            .to(2u8)
            .when_local(|t: &Tank| t.fuel == 0)
            .build()
            .unwrap();

        assert_eq!(transition.origin, StateId::new(1));
        assert_eq!(transition.target, StateId::new(2));
        assert!(transition.can_fire(&Tank { fuel: 0 }));
        assert!(!transition.can_fire(&Tank { fuel: 5 }));
    }

    #[test]
    fn sourced_guard_reads_owner() {
        let alarm = Rc::new(Cell::new(false));
        let transition = TransitionBuilder::<Tank>::new()
            .from(1u8)
            .to(3u8)
            .when_sourced(&alarm, |a| a.get())
            .build()
            .unwrap();

        let tank = Tank { fuel: 1 };
        assert!(!transition.can_fire(&tank));
        alarm.set(true);
        assert!(transition.can_fire(&tank));
    }

    #[test]
    fn always_fires() {
        let transition = TransitionBuilder::<Tank>::new()
            .from(1u8)
            .to(1u8)
            .always()
            .build()
            .unwrap();

        assert!(transition.can_fire(&Tank { fuel: 9 }));
    }
}
