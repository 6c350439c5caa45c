//! Transition conditions.
//!
//! A condition is a zero-argument boolean predicate bound to an owner at
//! registration time. The owner is either the machine's own blueprint data
//! (the default), an explicit host object held through a non-owning
//! reference, or nothing at all for free closures.

use std::fmt;
use std::rc::{Rc, Weak};

/// Who a condition reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionOwner {
    /// The machine's own blueprint data.
    Machine,
    /// A host object referenced weakly.
    Sourced,
    /// A self-contained closure.
    Free,
}

trait SourcedPredicate {
    fn is_bound(&self) -> bool;
    fn evaluate(&self) -> bool;
}

struct Sourced<T, F> {
    owner: Weak<T>,
    predicate: F,
}

impl<T, F> SourcedPredicate for Sourced<T, F>
where
    F: Fn(&T) -> bool,
{
    fn is_bound(&self) -> bool {
        self.owner.strong_count() > 0
    }

    fn evaluate(&self) -> bool {
        // A dropped owner never satisfies its condition.
        self.owner
            .upgrade()
            .is_some_and(|owner| (self.predicate)(&owner))
    }
}

enum Binding<M> {
    Local(Box<dyn Fn(&M) -> bool>),
    Sourced(Box<dyn SourcedPredicate>),
    Free(Box<dyn Fn() -> bool>),
}

/// Predicate guarding a transition of a machine whose blueprint is `M`.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use ticking_fsm::core::Condition;
///
/// struct Thermostat {
///     temperature: f32,
/// }
///
/// // Reads the machine's own data.
/// let too_hot = Condition::local(|t: &Thermostat| t.temperature > 30.0);
///
/// // Reads a host object the machine does not own.
/// let door_open = Rc::new(Cell::new(false));
/// let opened = Condition::<Thermostat>::sourced(&door_open, |door| door.get());
///
/// let model = Thermostat { temperature: 35.0 };
/// assert!(too_hot.check(&model));
/// assert!(!opened.check(&model));
/// door_open.set(true);
/// assert!(opened.check(&model));
/// ```
pub struct Condition<M> {
    binding: Binding<M>,
}

impl<M: 'static> Condition<M> {
    /// Condition owned by the machine itself, evaluated against its blueprint.
    pub fn local<F>(predicate: F) -> Self
    where
        F: Fn(&M) -> bool + 'static,
    {
        Condition {
            binding: Binding::Local(Box::new(predicate)),
        }
    }

    /// Condition owned by a host object. The machine keeps only a weak
    /// reference; once the owner is dropped the condition never holds.
    pub fn sourced<T, F>(owner: &Rc<T>, predicate: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> bool + 'static,
    {
        Self::sourced_weak(&Rc::downgrade(owner), predicate)
    }

    /// Same as [`Condition::sourced`] for an owner already held weakly.
    /// Registering it fails if the owner is gone.
    pub fn sourced_weak<T, F>(owner: &Weak<T>, predicate: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> bool + 'static,
    {
        Condition {
            binding: Binding::Sourced(Box::new(Sourced {
                owner: owner.clone(),
                predicate,
            })),
        }
    }

    /// Condition from a self-contained closure.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Condition {
            binding: Binding::Free(Box::new(predicate)),
        }
    }

    /// Condition that always holds.
    pub fn always() -> Self {
        Self::from_fn(|| true)
    }
}

impl<M> Condition<M> {
    /// Evaluate the condition.
    pub fn check(&self, model: &M) -> bool {
        match &self.binding {
            Binding::Local(predicate) => predicate(model),
            Binding::Sourced(sourced) => sourced.evaluate(),
            Binding::Free(predicate) => predicate(),
        }
    }

    /// Whether the condition's owner is still reachable.
    pub fn is_bound(&self) -> bool {
        match &self.binding {
            Binding::Sourced(sourced) => sourced.is_bound(),
            Binding::Local(_) | Binding::Free(_) => true,
        }
    }

    pub fn owner(&self) -> ConditionOwner {
        match &self.binding {
            Binding::Local(_) => ConditionOwner::Machine,
            Binding::Sourced(_) => ConditionOwner::Sourced,
            Binding::Free(_) => ConditionOwner::Free,
        }
    }
}

impl<M> fmt::Debug for Condition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("owner", &self.owner())
            .field("bound", &self.is_bound())
            .finish()
    }
}
