//! Validation of a machine's configuration.
//!
//! The runtime never validates transition targets at registration time: a
//! target may be registered after the transition that points at it. This
//! module checks a finished configuration using Stillwater's `Validation`
//! type, reporting ALL problems in one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use ticking_fsm::core::{Condition, State, StateId};
//! use ticking_fsm::runtime::StateMachine;
//!
//! struct Plain;
//! impl State for Plain {}
//!
//! let mut machine = StateMachine::new(());
//! machine.add_state(StateId::new(1), Plain).unwrap();
//! machine
//!     .register_transition(StateId::new(1), StateId::new(5), Condition::always())
//!     .unwrap();
//!
//! assert!(machine.validate().is_failure());
//! assert_eq!(machine.dangling_states(), vec![StateId::new(5)]);
//! ```

pub mod rules;
pub mod violations;

pub use rules::ConfigReport;
pub use violations::ConfigViolation;
