//! Machine variants.

use super::error::Result;
use super::machine::StateMachine;

/// The host-defined variant of a state machine.
///
/// A blueprint is the data conditions read from, plus the hooks a machine
/// variant may override: wiring on init, a post-tick hook, and a table of
/// named conditions used by name-based registration.
///
/// # Example
///
/// ```rust
/// use ticking_fsm::core::{State, StateId};
/// use ticking_fsm::runtime::{Blueprint, Result, StateMachine, Transition};
///
/// const IDLE: StateId = StateId::new(1);
/// const MOVING: StateId = StateId::new(2);
///
/// struct Idle;
/// impl State for Idle {}
///
/// struct Moving;
/// impl State for Moving {}
///
/// #[derive(Default)]
/// struct Walker {
///     speed: f32,
/// }
///
/// impl Blueprint for Walker {
///     fn on_init(machine: &mut StateMachine<Self>) -> Result<()> {
///         machine.add_state(IDLE, Idle)?;
///         machine.add_state(MOVING, Moving)?;
///         machine.register_transitions([
///             Transition::local(IDLE, MOVING, |w: &Walker| w.speed > 0.0),
///             Transition::local(MOVING, IDLE, |w: &Walker| w.speed <= 0.0),
///         ])?;
///         machine.force_transition(IDLE)
///     }
/// }
///
/// let mut machine = StateMachine::new(Walker::default());
/// machine.init().unwrap();
/// machine.tick(0.016).unwrap();
/// assert_eq!(machine.active_state(), IDLE);
///
/// machine.model_mut().speed = 2.0;
/// machine.tick(0.016).unwrap();
/// assert_eq!(machine.active_state(), MOVING);
/// ```
pub trait Blueprint: Sized + 'static {
    /// Register states and transitions and pick the initial state.
    /// Runs once from [`StateMachine::init`].
    fn on_init(_machine: &mut StateMachine<Self>) -> Result<()> {
        Ok(())
    }

    /// Runs at the end of every tick, whether or not a transition happened.
    fn on_tick(_machine: &mut StateMachine<Self>, _delta: f32) {}

    /// Look up a condition of this blueprint by name.
    fn condition(_name: &str) -> Option<fn(&Self) -> bool> {
        None
    }
}

/// A machine without data or hooks.
impl Blueprint for () {}
