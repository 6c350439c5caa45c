//! Identities for states and machines.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a state inside a single machine.
///
/// The raw value `0` is reserved: it is [`StateId::NONE`], meaning "no state"
/// (no active state yet, or no pending forced transition). It can never be
/// registered as a real state.
///
/// # Example
///
/// ```rust
/// use ticking_fsm::core::StateId;
///
/// let idle = StateId::new(1);
/// assert!(idle.is_some());
/// assert!(StateId::NONE.is_none());
/// assert_eq!(StateId::from(1u8), idle);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StateId(u8);

impl StateId {
    /// The "absent" sentinel.
    pub const NONE: StateId = StateId(0);

    pub const fn new(raw: u8) -> Self {
        StateId(raw)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl From<u8> for StateId {
    fn from(raw: u8) -> Self {
        StateId(raw)
    }
}

impl From<StateId> for u8 {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("none")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Identity of a machine instance.
///
/// States keep their owner's `MachineId` as a non-owning back-reference, and
/// every log event emitted by a machine carries it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(Uuid);

impl MachineId {
    pub fn new() -> Self {
        MachineId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
