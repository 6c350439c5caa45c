//! Transition log.
//!
//! A `TransitionLog` is attached to a machine as a state-change observer
//! and keeps a timestamped record of every committed transition. It is a
//! diagnostic trail for host tooling, not a snapshot of machine state.

use super::id::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// One committed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Active state before the commit, `NONE` for the first one
    pub from: StateId,
    /// Active state after the commit
    pub to: StateId,
    /// When the commit was observed
    pub timestamp: DateTime<Utc>,
}

/// Ordered record of committed transitions.
///
/// An unbounded log grows by one record per commit for as long as the
/// machine runs. Long-lived hosts should either `clear` it periodically or
/// create it with [`TransitionLog::bounded`], which keeps only the most
/// recent records.
///
/// # Example
///
/// ```rust
/// use ticking_fsm::core::TransitionLog;
/// use ticking_fsm::runtime::StateMachine;
///
/// let mut machine = StateMachine::new(());
/// let log = TransitionLog::shared();
/// machine.on_state_changed(TransitionLog::observer(&log));
///
/// assert!(log.borrow().is_empty());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity: Option<usize>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            capacity: None,
        }
    }

    /// A log that keeps at most `capacity` records, dropping the oldest.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// A log ready to be shared with an observer.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Observer callback that appends to `log`.
    ///
    /// The callback holds the log weakly, so dropping the log stops recording
    /// without unsubscribing.
    pub fn observer(log: &Rc<RefCell<Self>>) -> impl FnMut(StateId, StateId) + 'static {
        let log: Weak<RefCell<Self>> = Rc::downgrade(log);
        move |from, to| {
            let Some(log) = log.upgrade() else {
                return;
            };
            match log.try_borrow_mut() {
                Ok(mut log) => log.record(from, to),
                Err(_) => tracing::warn!(%from, %to, "transition log busy, record dropped"),
            };
        }
    }

    /// Record a transition stamped with the current time.
    pub fn record(&mut self, from: StateId, to: StateId) {
        self.push(TransitionRecord {
            from,
            to,
            timestamp: Utc::now(),
        });
    }

    pub fn push(&mut self, record: TransitionRecord) {
        self.records.push(record);
        if let Some(capacity) = self.capacity {
            let excess = self.records.len().saturating_sub(capacity);
            self.records.drain(..excess);
        }
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// States visited in order: the first record's `from`, then every `to`.
    pub fn path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the first and last record, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
