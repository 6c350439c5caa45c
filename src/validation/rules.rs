//! Transition table checks using Validation.

use crate::core::StateId;
use crate::runtime::{Blueprint, StateMachine};
use crate::validation::violations::ConfigViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of validating a machine: success, or every violation found.
pub type ConfigReport = Validation<(), NonEmptyVec<ConfigViolation>>;

impl<M: Blueprint> StateMachine<M> {
    /// Check the transition table against the registered states,
    /// accumulating ALL violations.
    ///
    /// Origins are visited in ascending order and each origin's transitions
    /// in evaluation order, so reports are deterministic.
    pub fn validate(&self) -> ConfigReport {
        let mut checks: Vec<ConfigReport> = Vec::new();

        for origin in self.transition_origins() {
            checks.push(require(
                self.contains_state(origin),
                ConfigViolation::DanglingOrigin { origin },
            ));

            for transition in self.transitions_from(origin) {
                let target = transition.target;
                checks.push(require(
                    self.contains_state(target),
                    ConfigViolation::DanglingTarget { origin, target },
                ));
                checks.push(require(
                    transition.condition.is_bound(),
                    ConfigViolation::OrphanedCondition { origin, target },
                ));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Identities referenced by transitions but not registered.
    pub fn dangling_states(&self) -> Vec<StateId> {
        let mut dangling: Vec<StateId> = self
            .transition_origins()
            .into_iter()
            .flat_map(|origin| {
                std::iter::once(origin)
                    .chain(self.transitions_from(origin).iter().map(|t| t.target))
            })
            .filter(|id| !self.contains_state(*id))
            .collect();
        dangling.sort_unstable();
        dangling.dedup();
        dangling
    }
}

fn require(ok: bool, violation: ConfigViolation) -> ConfigReport {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}
