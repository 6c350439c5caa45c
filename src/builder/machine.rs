//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{State, StateId, StateNode};
use crate::runtime::{Blueprint, StateMachine, Transition};

/// Builder for constructing state machines with a fluent API.
///
/// `build` applies everything in a fixed order: states, transitions, then
/// `init` (when enabled), then the initial forced transition. An initial
/// state set here therefore overrides one forced by `Blueprint::on_init`.
pub struct StateMachineBuilder<M: Blueprint> {
    model: M,
    states: Vec<(StateId, StateNode)>,
    transitions: Vec<Transition<M>>,
    initial: Option<StateId>,
    auto_init: bool,
}

impl<M: Blueprint> StateMachineBuilder<M> {
    /// Create a new builder around `model`. Auto-init is on by default.
    pub fn new(model: M) -> Self {
        Self {
            model,
            states: Vec::new(),
            transitions: Vec::new(),
            initial: None,
            auto_init: true,
        }
    }

    /// Add a state.
    pub fn state<S: State>(self, id: impl Into<StateId>, state: S) -> Self {
        self.node(id, StateNode::new(state))
    }

    /// Add a detached state node.
    pub fn node(mut self, id: impl Into<StateId>, node: StateNode) -> Self {
        self.states.push((id.into(), node));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<M>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<M>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once, keeping their order.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition<M>>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Force this state on the first tick.
    pub fn initial(mut self, id: impl Into<StateId>) -> Self {
        self.initial = Some(id.into());
        self
    }

    /// Whether `build` runs `init`.
    pub fn auto_init(mut self, enabled: bool) -> Self {
        self.auto_init = enabled;
        self
    }

    /// Build the state machine.
    pub fn build(self) -> Result<StateMachine<M>, BuildError> {
        let mut machine = StateMachine::new(self.model);

        for (id, node) in self.states {
            machine.add_state_node(id, node)?;
        }
        machine.register_transitions(self.transitions)?;

        if self.auto_init {
            machine.init()?;
        }
        if let Some(initial) = self.initial {
            machine.force_transition(initial)?;
        }

        Ok(machine)
    }
}

impl<M: Blueprint + Default> Default for StateMachineBuilder<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Condition;
    use crate::runtime::{MachineError, Result, TickOutcome};

    const IDLE: StateId = StateId::new(1);
    const BUSY: StateId = StateId::new(2);

    struct Plain;
    impl State for Plain {}

    #[derive(Default)]
    struct Queue {
        jobs: usize,
    }

    impl Blueprint for Queue {}

    struct SelfStarting;

    impl Blueprint for SelfStarting {
        fn on_init(machine: &mut StateMachine<Self>) -> Result<()> {
            machine.force_transition(IDLE)
        }
    }

    #[test]
    fn fluent_api_builds_machine() {
        let mut machine = StateMachineBuilder::new(Queue::default())
            .state(IDLE, Plain)
            .state(BUSY, Plain)
            .transition(
                TransitionBuilder::new()
                    .from(IDLE)
                    .to(BUSY)
                    .when_local(|q: &Queue| q.jobs > 0),
            )
            .unwrap()
            .add_transition(Transition::local(BUSY, IDLE, |q: &Queue| q.jobs == 0))
            .initial(IDLE)
            .build()
            .unwrap();

        assert!(machine.is_initialized());
        assert_eq!(machine.state_count(), 2);
        assert_eq!(machine.transition_count(), 2);
        assert_eq!(machine.pending_state(), IDLE);

        machine.tick(0.1).unwrap();
        machine.model_mut().jobs = 3;
        assert_eq!(
            machine.tick(0.1).unwrap(),
            TickOutcome::Transitioned {
                from: IDLE,
                to: BUSY
            }
        );
    }

    #[test]
    fn builder_surfaces_transition_errors() {
        let result = StateMachineBuilder::new(Queue::default())
            .transition(TransitionBuilder::new().from(IDLE).always());

        assert!(matches!(result, Err(BuildError::MissingTarget)));
    }

    #[test]
    fn builder_surfaces_machine_errors() {
        let result = StateMachineBuilder::new(Queue::default())
            .state(StateId::NONE, Plain)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Machine(MachineError::InvalidIdentity { .. }))
        ));
    }

    #[test]
    fn transitions_keep_order() {
        let machine = StateMachineBuilder::new(Queue::default())
            .state(IDLE, Plain)
            .transitions(vec![
                Transition::new(IDLE, BUSY, Condition::always()),
                Transition::new(IDLE, IDLE, Condition::always()),
            ])
            .build()
            .unwrap();

        let targets: Vec<StateId> = machine
            .transitions_from(IDLE)
            .iter()
            .map(|t| t.target)
            .collect();
        assert_eq!(targets, vec![BUSY, IDLE]);
    }

    #[test]
    fn auto_init_can_be_disabled() {
        let machine = StateMachineBuilder::new(SelfStarting)
            .state(IDLE, Plain)
            .auto_init(false)
            .build()
            .unwrap();

        assert!(!machine.is_initialized());
        assert_eq!(machine.pending_state(), StateId::NONE);
    }

    #[test]
    fn initial_overrides_blueprint_choice() {
        let machine = StateMachineBuilder::new(SelfStarting)
            .state(IDLE, Plain)
            .state(BUSY, Plain)
            .initial(BUSY)
            .build()
            .unwrap();

        assert_eq!(machine.pending_state(), BUSY);
    }
}
