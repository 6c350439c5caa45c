//! Tick-driven state machine.

use super::blueprint::Blueprint;
use super::error::{MachineError, Result};
use super::naming::NamingConvention;
use super::transition::{TickOutcome, Transition};
use crate::core::{Condition, MachineId, State, StateId, StateNode};
use std::collections::HashMap;
use std::fmt;

/// Handle returned by [`StateMachine::on_state_changed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type StateObserver = Box<dyn FnMut(StateId, StateId)>;

/// State machine owning its states and transition table.
///
/// Setup calls (`add_state`, `register_transition`, `force_transition`, ...)
/// are made by the host, usually from [`Blueprint::on_init`]. The host then
/// calls [`tick`](Self::tick) once per update cycle. Each tick does exactly
/// one of: commit the pending forced transition, commit the first
/// conditional transition of the active state whose condition holds, or
/// update the active state.
///
/// Lifecycle hooks, conditions and observers never get access to the
/// machine, so a tick cannot be re-entered from inside itself.
pub struct StateMachine<M: Blueprint = ()> {
    id: MachineId,
    model: M,
    states: HashMap<StateId, StateNode>,
    transitions: HashMap<StateId, Vec<Transition<M>>>,
    active: StateId,
    pending: StateId,
    observers: Vec<(ObserverId, StateObserver)>,
    next_observer: u64,
    initialized: bool,
}

impl<M: Blueprint> StateMachine<M> {
    /// Create an empty, uninitialized machine around `model`.
    pub fn new(model: M) -> Self {
        Self {
            id: MachineId::new(),
            model,
            states: HashMap::new(),
            transitions: HashMap::new(),
            active: StateId::NONE,
            pending: StateId::NONE,
            observers: Vec::new(),
            next_observer: 0,
            initialized: false,
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Run the blueprint's init hook. Must be called once before the first tick.
    pub fn init(&mut self) -> Result<()> {
        tracing::info!(machine = %self.id, "initializing state machine");
        M::on_init(self)?;
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // States

    /// Attach a new state under `id`, returning the state it replaced.
    pub fn add_state<S: State>(
        &mut self,
        id: impl Into<StateId>,
        state: S,
    ) -> Result<Option<StateNode>> {
        self.add_state_node(id, StateNode::new(state))
    }

    /// Attach a detached node under `id`, returning the state it replaced.
    ///
    /// The node's owner is set to this machine and its `on_attached` hook
    /// fires. A node still attached to another machine is detached from it
    /// first; that machine keeps no record of it. Replacing the active state keeps it active without calling
    /// `exit` on the old state or `enter` on the new one.
    pub fn add_state_node(
        &mut self,
        id: impl Into<StateId>,
        mut node: StateNode,
    ) -> Result<Option<StateNode>> {
        let id = id.into();
        if id.is_none() {
            return Err(MachineError::invalid_identity("add_state"));
        }
        if let Some(previous) = node.owner() {
            tracing::warn!(
                machine = %self.id,
                previous = %previous,
                state = %id,
                "state node still attached elsewhere, detaching"
            );
            node.detach();
        }

        node.attach(id, self.id);
        let mut replaced = self.states.insert(id, node);
        if let Some(old) = replaced.as_mut() {
            old.detach();
            tracing::warn!(
                machine = %self.id,
                state = %id,
                replaced = old.name(),
                active = id == self.active,
                "state identity re-registered, previous state discarded"
            );
        }
        Ok(replaced)
    }

    /// Move a state out of `previous` and attach it here under `id`.
    ///
    /// `previous` loses the state exactly as if [`remove_state`](Self::remove_state)
    /// had been called on it.
    pub fn adopt_state<P: Blueprint>(
        &mut self,
        previous: &mut StateMachine<P>,
        from: impl Into<StateId>,
        id: impl Into<StateId>,
    ) -> Result<Option<StateNode>> {
        let from = from.into();
        let id = id.into();
        if id.is_none() {
            return Err(MachineError::invalid_identity("adopt_state"));
        }
        let node = previous
            .remove_state(from)
            .ok_or(MachineError::UnknownState { id: from })?;
        tracing::debug!(
            machine = %self.id,
            previous = %previous.id,
            from = %from,
            to = %id,
            "adopting state"
        );
        self.add_state_node(id, node)
    }

    /// Detach and return the state registered under `id`.
    ///
    /// Removing the active state leaves the machine without an active state
    /// until a new one is forced. Transitions referencing `id` are kept.
    pub fn remove_state(&mut self, id: impl Into<StateId>) -> Option<StateNode> {
        let id = id.into();
        let mut node = self.states.remove(&id)?;
        if id == self.active {
            self.active = StateId::NONE;
            tracing::debug!(machine = %self.id, state = %id, "active state removed");
        }
        node.detach();
        Some(node)
    }

    pub fn state(&self, id: impl Into<StateId>) -> Option<&StateNode> {
        self.states.get(&id.into())
    }

    pub fn state_mut(&mut self, id: impl Into<StateId>) -> Option<&mut StateNode> {
        self.states.get_mut(&id.into())
    }

    pub fn contains_state(&self, id: impl Into<StateId>) -> bool {
        self.states.contains_key(&id.into())
    }

    /// Registered identities in ascending order.
    pub fn state_ids(&self) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self.states.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Active state, `NONE` before the first commit or after it was removed.
    pub fn active_state(&self) -> StateId {
        self.active
    }

    pub fn active(&self) -> Option<&StateNode> {
        self.states.get(&self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut StateNode> {
        self.states.get_mut(&self.active)
    }

    /// Forced target waiting for the next tick, `NONE` if there is none.
    pub fn pending_state(&self) -> StateId {
        self.pending
    }

    // Transitions

    /// Append a transition to `origin`'s ordered sequence.
    ///
    /// The target does not have to be registered yet; a transition whose
    /// target is missing at tick time is skipped.
    pub fn register_transition(
        &mut self,
        origin: impl Into<StateId>,
        target: impl Into<StateId>,
        condition: Condition<M>,
    ) -> Result<()> {
        self.register(Transition {
            origin: origin.into(),
            target: target.into(),
            condition,
        })
    }

    /// Register a transition guarded by the blueprint condition called `name`.
    pub fn register_transition_local(
        &mut self,
        origin: impl Into<StateId>,
        target: impl Into<StateId>,
        name: &str,
    ) -> Result<()> {
        let predicate = M::condition(name).ok_or_else(|| MachineError::UnboundCondition {
            name: name.to_string(),
        })?;
        self.register_transition(origin, target, Condition::local(predicate))
    }

    /// Register transitions in order, as repeated single registrations.
    /// Stops at the first invalid one; earlier ones stay registered.
    pub fn register_transitions<I>(&mut self, transitions: I) -> Result<()>
    where
        I: IntoIterator<Item = Transition<M>>,
    {
        transitions
            .into_iter()
            .try_for_each(|transition| self.register(transition))
    }

    /// Register a transition for every ordered pair of `names` whose
    /// condition, named by `naming`, exists on the blueprint.
    ///
    /// A name's index in `names` is its state identity, so index 0 is the
    /// `NONE` sentinel. Self-pairs are included. Pairs involving the sentinel
    /// are skipped with a warning even when their condition exists. Returns
    /// how many transitions were registered.
    pub fn auto_register_transitions<S: AsRef<str>>(
        &mut self,
        names: &[S],
        naming: &NamingConvention,
    ) -> Result<usize> {
        if names.len() > usize::from(u8::MAX) + 1 {
            return Err(MachineError::NameTableTooLarge { len: names.len() });
        }

        let mut registered = 0;
        for (origin, origin_name) in names.iter().enumerate() {
            for (target, target_name) in names.iter().enumerate() {
                let name = naming.condition_name(origin_name.as_ref(), target_name.as_ref());
                let Some(predicate) = M::condition(&name) else {
                    tracing::trace!(machine = %self.id, condition = %name, "no such condition");
                    continue;
                };
                if origin == 0 || target == 0 {
                    tracing::warn!(
                        machine = %self.id,
                        condition = %name,
                        "condition involves the none state, skipped"
                    );
                    continue;
                }
                self.register_transition(
                    StateId::new(origin as u8),
                    StateId::new(target as u8),
                    Condition::local(predicate),
                )?;
                registered += 1;
            }
        }

        tracing::debug!(machine = %self.id, registered, "auto-registered transitions");
        Ok(registered)
    }

    /// Transitions out of `origin`, in evaluation order.
    pub fn transitions_from(&self, origin: impl Into<StateId>) -> &[Transition<M>] {
        self.transitions
            .get(&origin.into())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// Origins that have at least one transition, in ascending order.
    pub fn transition_origins(&self) -> Vec<StateId> {
        let mut origins: Vec<StateId> = self.transitions.keys().copied().collect();
        origins.sort_unstable();
        origins
    }

    fn register(&mut self, transition: Transition<M>) -> Result<()> {
        if transition.origin.is_none() || transition.target.is_none() {
            return Err(MachineError::invalid_identity("register_transition"));
        }
        if !transition.condition.is_bound() {
            return Err(MachineError::ConditionOwnerDropped {
                origin: transition.origin,
                target: transition.target,
            });
        }
        self.transitions
            .entry(transition.origin)
            .or_default()
            .push(transition);
        Ok(())
    }

    /// Request a transition to `id` on the next tick, regardless of
    /// conditions and locks. The last request before a tick wins.
    pub fn force_transition(&mut self, id: impl Into<StateId>) -> Result<()> {
        let id = id.into();
        if id.is_none() {
            return Err(MachineError::invalid_identity("force_transition"));
        }
        if self.pending.is_some() && self.pending != id {
            tracing::trace!(
                machine = %self.id,
                replaced = %self.pending,
                pending = %id,
                "forced transition replaced"
            );
        }
        self.pending = id;
        Ok(())
    }

    // Observers

    /// Subscribe to committed transitions. Observers run in subscription
    /// order with `(previous, next)` after the new state's `enter`.
    pub fn on_state_changed<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(StateId, StateId) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    // Ticking

    /// Advance the machine by one update cycle.
    ///
    /// `delta` is passed unchanged to the active state's `update`. The
    /// blueprint's `on_tick` hook runs afterwards on every tick, including
    /// ticks whose commit failed.
    pub fn tick(&mut self, delta: f32) -> Result<TickOutcome> {
        if !self.initialized {
            tracing::warn!(machine = %self.id, "tick before init");
            return Err(MachineError::NotInitialized);
        }
        let outcome = self.advance(delta);
        M::on_tick(self, delta);
        outcome
    }

    fn advance(&mut self, delta: f32) -> Result<TickOutcome> {
        if self.pending.is_some() {
            let target = std::mem::take(&mut self.pending);
            let from = self.commit(target, true).inspect_err(|err| {
                tracing::warn!(machine = %self.id, state = %target, %err, "forced transition failed");
            })?;
            return Ok(TickOutcome::Forced { from, to: target });
        }

        if let Some(target) = self.select_transition() {
            let from = self.commit(target, false)?;
            return Ok(TickOutcome::Transitioned { from, to: target });
        }

        match self.states.get_mut(&self.active) {
            Some(node) => {
                node.update(delta);
                tracing::trace!(machine = %self.id, state = %self.active, delta, "state updated");
                Ok(TickOutcome::Updated(self.active))
            }
            None => Ok(TickOutcome::Idle),
        }
    }

    /// First transition of the active state whose condition holds.
    fn select_transition(&self) -> Option<StateId> {
        let active = self.states.get(&self.active)?;
        if active.is_locked() {
            return None;
        }
        self.transitions
            .get(&self.active)?
            .iter()
            .filter(|transition| {
                let resolves = self.states.contains_key(&transition.target);
                if !resolves {
                    tracing::trace!(
                        machine = %self.id,
                        origin = %transition.origin,
                        to = %transition.target,
                        "skipping transition to unregistered state"
                    );
                }
                resolves
            })
            .find(|transition| transition.can_fire(&self.model))
            .map(|transition| transition.target)
    }

    /// Make `target` the active state: exit, switch, enter, notify.
    /// Fails without touching anything if `target` is not registered.
    fn commit(&mut self, target: StateId, forced: bool) -> Result<StateId> {
        if !self.states.contains_key(&target) {
            return Err(MachineError::UnknownState { id: target });
        }

        let previous = self.active;
        if let Some(node) = self.states.get_mut(&previous) {
            node.exit();
        }
        self.active = target;
        if let Some(node) = self.states.get_mut(&target) {
            node.enter();
        }

        tracing::debug!(machine = %self.id, from = %previous, to = %target, forced, "state transition");
        for (_, observer) in self.observers.iter_mut() {
            observer(previous, target);
        }
        Ok(previous)
    }
}

impl<M: Blueprint + Default> Default for StateMachine<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: Blueprint + fmt::Debug> fmt::Debug for StateMachine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("states", &self.state_ids())
            .field("transitions", &self.transition_count())
            .field("active", &self.active)
            .field("pending", &self.pending)
            .field("observers", &self.observers.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

/// Create a machine for `model`, running `init` right away when `auto_init`.
pub fn create_state_machine<M: Blueprint>(model: M, auto_init: bool) -> Result<StateMachine<M>> {
    let mut machine = StateMachine::new(model);
    if auto_init {
        machine.init()?;
    }
    Ok(machine)
}
