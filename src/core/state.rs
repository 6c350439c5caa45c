//! The `State` trait and the node a machine keeps for each registered state.
//!
//! Host code implements [`State`] for each concrete behavior. The machine
//! wraps it in a [`StateNode`], which adds the data every state carries
//! regardless of behavior: identity, lock flag and owner back-reference.

use super::id::{MachineId, StateId};
use std::fmt;

/// Lifecycle hooks of a state.
///
/// Every hook has a no-op default, so a state overrides only what it needs.
/// Hooks receive the state's [`StateControl`], through which a state can
/// read its identity and owner and lock or unlock itself.
///
/// # Example
///
/// ```rust
/// use ticking_fsm::core::{State, StateControl};
///
/// struct Charging {
///     charge: f32,
/// }
///
/// impl State for Charging {
///     fn enter(&mut self, control: &mut StateControl) {
///         self.charge = 0.0;
///         // Hold this state until fully charged.
///         control.set_locked(true);
///     }
///
///     fn update(&mut self, control: &mut StateControl, delta: f32) {
///         self.charge += delta;
///         if self.charge >= 1.0 {
///             control.set_locked(false);
///         }
///     }
/// }
/// ```
pub trait State: 'static {
    /// Name used in log events. Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once, right after this state becomes the active state.
    fn enter(&mut self, _control: &mut StateControl) {}

    /// Called on every tick this state is active and no transition committed.
    fn update(&mut self, _control: &mut StateControl, _delta: f32) {}

    /// Called once, right before the machine moves away from this state.
    fn exit(&mut self, _control: &mut StateControl) {}

    /// Called after the state is attached to a machine, on every attachment.
    fn on_attached(&mut self, _control: &mut StateControl) {}
}

/// Per-state data owned by the machine alongside the behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateControl {
    identity: StateId,
    locked: bool,
    owner: Option<MachineId>,
}

impl StateControl {
    /// Identity this state is registered under, `NONE` while detached.
    pub fn identity(&self) -> StateId {
        self.identity
    }

    /// Machine currently owning this state.
    pub fn owner(&self) -> Option<MachineId> {
        self.owner
    }

    /// A locked state suppresses conditional transitions while active.
    /// Forced transitions still apply.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// A state behavior together with its [`StateControl`].
///
/// Nodes are owned by exactly one machine at a time. A node returned from
/// [`StateMachine::remove_state`](crate::runtime::StateMachine::remove_state)
/// is detached and may be attached to any machine again.
pub struct StateNode {
    behavior: Box<dyn State>,
    control: StateControl,
}

impl StateNode {
    pub fn new<S: State>(state: S) -> Self {
        Self::from_boxed(Box::new(state))
    }

    pub fn from_boxed(behavior: Box<dyn State>) -> Self {
        Self {
            behavior,
            control: StateControl::default(),
        }
    }

    pub fn name(&self) -> &str {
        self.behavior.name()
    }

    pub fn identity(&self) -> StateId {
        self.control.identity
    }

    pub fn owner(&self) -> Option<MachineId> {
        self.control.owner
    }

    pub fn is_attached(&self) -> bool {
        self.control.owner.is_some()
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.control.set_locked(locked);
    }

    pub fn is_locked(&self) -> bool {
        self.control.is_locked()
    }

    pub fn control(&self) -> &StateControl {
        &self.control
    }

    pub fn behavior(&self) -> &dyn State {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> &mut dyn State {
        self.behavior.as_mut()
    }

    pub(crate) fn attach(&mut self, identity: StateId, owner: MachineId) {
        self.control.identity = identity;
        self.control.owner = Some(owner);
        self.behavior.on_attached(&mut self.control);
    }

    pub(crate) fn detach(&mut self) {
        self.control.identity = StateId::NONE;
        self.control.owner = None;
    }

    pub(crate) fn enter(&mut self) {
        self.behavior.enter(&mut self.control);
    }

    pub(crate) fn update(&mut self, delta: f32) {
        self.behavior.update(&mut self.control, delta);
    }

    pub(crate) fn exit(&mut self) {
        self.behavior.exit(&mut self.control);
    }
}

impl fmt::Debug for StateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("name", &self.name())
            .field("control", &self.control)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Quiet;

    impl State for Quiet {}

    struct Recording {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl State for Recording {
        fn name(&self) -> &str {
            "Recording"
        }

        fn enter(&mut self, control: &mut StateControl) {
            self.events
                .borrow_mut()
                .push(format!("enter {}", control.identity()));
        }

        fn update(&mut self, _control: &mut StateControl, delta: f32) {
            self.events.borrow_mut().push(format!("update {delta}"));
        }

        fn exit(&mut self, _control: &mut StateControl) {
            self.events.borrow_mut().push("exit".to_string());
        }

        fn on_attached(&mut self, control: &mut StateControl) {
            assert!(control.owner().is_some());
            self.events.borrow_mut().push("attached".to_string());
        }
    }

    #[test]
    fn default_hooks_are_no_ops() {
        let mut node = StateNode::new(Quiet);
        node.attach(StateId::new(1), MachineId::new());
        node.enter();
        node.update(0.5);
        node.exit();
        assert_eq!(node.identity(), StateId::new(1));
        assert!(!node.is_locked());
    }

    #[test]
    fn default_name_is_type_name() {
        let node = StateNode::new(Quiet);
        assert!(node.name().ends_with("Quiet"));
    }

    #[test]
    fn lock_flag_is_plain_data() {
        let mut node = StateNode::new(Quiet);
        node.set_locked(true);
        assert!(node.is_locked());
        node.set_locked(false);
        assert!(!node.is_locked());
    }

    #[test]
    fn attach_sets_owner_then_fires_hook() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let owner = MachineId::new();
        let mut node = StateNode::new(Recording {
            events: events.clone(),
        });

        assert!(!node.is_attached());
        node.attach(StateId::new(4), owner);

        assert_eq!(node.owner(), Some(owner));
        assert_eq!(*events.borrow(), vec!["attached"]);
    }

    #[test]
    fn hooks_see_their_control() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut node = StateNode::new(Recording {
            events: events.clone(),
        });
        node.attach(StateId::new(2), MachineId::new());
        node.enter();
        node.update(0.25);
        node.exit();

        assert_eq!(
            *events.borrow(),
            vec!["attached", "enter 2", "update 0.25", "exit"]
        );
    }

    #[test]
    fn detach_clears_owner_but_keeps_lock() {
        let mut node = StateNode::new(Quiet);
        node.attach(StateId::new(1), MachineId::new());
        node.set_locked(true);
        node.detach();

        assert!(!node.is_attached());
        assert_eq!(node.identity(), StateId::NONE);
        assert!(node.is_locked());
    }
}
