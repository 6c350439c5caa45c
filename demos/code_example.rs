//! Three states cycling on the sign of a test value.
//!
//! Run with `RUST_LOG=ticking_fsm=debug cargo run --example code_example`
//! to see the machine's transition events.

use ticking_fsm::core::{State, StateControl, TransitionLog};
use ticking_fsm::runtime::{create_state_machine, Blueprint, MachineError, Result, StateMachine};
use ticking_fsm::state_ids;
use tracing_subscriber::EnvFilter;

state_ids! {
    pub enum Step {
        One,
        Two,
        Three,
    }
}

struct StepState(Step);

impl State for StepState {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn enter(&mut self, _control: &mut StateControl) {
        tracing::info!(state = self.0.name(), "enter");
    }

    fn update(&mut self, _control: &mut StateControl, delta: f32) {
        tracing::info!(state = self.0.name(), delta, "update");
    }

    fn exit(&mut self, _control: &mut StateControl) {
        tracing::info!(state = self.0.name(), "exit");
    }
}

#[derive(Debug, Default)]
struct CodeExample {
    test_value: f32,
}

impl Blueprint for CodeExample {
    fn on_init(machine: &mut StateMachine<Self>) -> Result<()> {
        for step in [Step::One, Step::Two, Step::Three] {
            machine.add_state(step, StepState(step))?;
        }

        for (origin, target) in [
            (Step::One, Step::Two),
            (Step::One, Step::Three),
            (Step::Two, Step::One),
            (Step::Three, Step::One),
        ] {
            let name = format!("Condition_{}_{}", origin.name(), target.name());
            machine.register_transition_local(origin, target, &name)?;
        }

        // Or: machine.auto_register_transitions(Step::NAMES, &NamingConvention::default())?;

        machine.force_transition(Step::One)
    }

    fn condition(name: &str) -> Option<fn(&Self) -> bool> {
        match name {
            "Condition_One_Two" => Some(|m: &Self| m.test_value > 0.0),
            "Condition_One_Three" => Some(|m: &Self| m.test_value < 0.0),
            "Condition_Two_One" => Some(|m: &Self| m.test_value <= 0.0),
            "Condition_Three_One" => Some(|m: &Self| m.test_value >= 0.0),
            _ => None,
        }
    }
}

fn main() -> std::result::Result<(), MachineError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mut machine = create_state_machine(CodeExample::default(), true)?;
    let log = TransitionLog::shared();
    machine.on_state_changed(TransitionLog::observer(&log));

    for value in [0.0, 2.0, 2.0, -1.0, -1.0, 0.5, 0.5] {
        machine.model_mut().test_value = value;
        let outcome = machine.tick(1.0 / 60.0)?;
        tracing::info!(test_value = value, ?outcome, "tick");
    }

    let path: Vec<String> = log.borrow().path().iter().map(ToString::to_string).collect();
    tracing::info!(path = %path.join(" -> "), "visited");
    Ok(())
}
