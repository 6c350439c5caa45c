//! Ticking FSM: an embeddable, tick-driven finite state machine runtime
//!
//! A host owns a [`StateMachine`](runtime::StateMachine), registers states and
//! guarded transitions on it, then calls `tick` once per update cycle. Each
//! tick commits at most one transition, or updates the active state.
//!
//! # Core Concepts
//!
//! - **State**: behavior with `enter` / `update` / `exit` hooks, via the `State` trait
//! - **Condition**: a predicate guarding a transition, bound to the machine's
//!   blueprint, to a host object held weakly, or to nothing at all
//! - **Locking**: a locked active state ignores conditional transitions
//! - **Forced transition**: a buffered override applied on the next tick
//! - **Blueprint**: the machine variant, carrying data, init wiring and a
//!   post-tick hook
//!
//! # Example
//!
//! ```rust
//! use ticking_fsm::core::{State, StateId};
//! use ticking_fsm::runtime::{Blueprint, Result, StateMachine, TickOutcome};
//!
//! const IDLE: StateId = StateId::new(1);
//! const ALERT: StateId = StateId::new(2);
//!
//! struct Idle;
//! impl State for Idle {}
//!
//! struct Alert;
//! impl State for Alert {}
//!
//! #[derive(Default)]
//! struct Sentry {
//!     noise: u32,
//! }
//!
//! impl Blueprint for Sentry {
//!     fn on_init(machine: &mut StateMachine<Self>) -> Result<()> {
//!         machine.add_state(IDLE, Idle)?;
//!         machine.add_state(ALERT, Alert)?;
//!         machine.register_transition_local(IDLE, ALERT, "Condition_Idle_Alert")?;
//!         machine.force_transition(IDLE)
//!     }
//!
//!     fn condition(name: &str) -> Option<fn(&Self) -> bool> {
//!         match name {
//!             "Condition_Idle_Alert" => Some(|g: &Self| g.noise > 3),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut machine = StateMachine::new(Sentry::default());
//! machine.init()?;
//!
//! assert_eq!(machine.tick(0.016)?, TickOutcome::Forced { from: StateId::NONE, to: IDLE });
//! assert_eq!(machine.tick(0.016)?, TickOutcome::Updated(IDLE));
//!
//! machine.model_mut().noise = 5;
//! assert_eq!(machine.tick(0.016)?, TickOutcome::Transitioned { from: IDLE, to: ALERT });
//! assert_eq!(machine.active_state(), ALERT);
//! # Ok::<(), ticking_fsm::runtime::MachineError>(())
//! ```

pub mod builder;
pub mod core;
pub mod runtime;
pub mod validation;

pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use crate::core::{Condition, State, StateControl, StateId, StateNode, TransitionLog};
pub use runtime::{Blueprint, MachineError, StateMachine, TickOutcome, Transition};
