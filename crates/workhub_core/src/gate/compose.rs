//! Multi-check composition helpers.
//!
//! Checks are passed as deferred closures so their inputs are only computed
//! when a check actually runs. List order is priority order.

use crate::gate::requirement::{Requirement, RequirementCheck};

/// Deferred check. Invoked at most once.
pub type DeferredCheck<'a> = Box<dyn FnOnce() -> RequirementCheck + 'a>;

/// Runs every deferred check in order and returns all results.
pub fn check_multiple_requirements<'a, I>(checks: I) -> Vec<RequirementCheck>
where
    I: IntoIterator<Item = DeferredCheck<'a>>,
{
    checks.into_iter().map(|check| check()).collect()
}

/// Requirement of the first failed check in list order, or `None` if all passed.
pub fn get_first_failed_requirement(checks: &[RequirementCheck]) -> Option<&Requirement> {
    checks.iter().find_map(RequirementCheck::failure)
}

/// Every failed requirement in list order.
pub fn failed_requirements(checks: &[RequirementCheck]) -> Vec<&Requirement> {
    checks.iter().filter_map(RequirementCheck::failure).collect()
}

/// Ordered builder over deferred checks.
///
/// `first_failure` stops at the first failing check, so later closures are
/// never invoked; `evaluate_all` runs every check.
#[derive(Default)]
pub struct GateChain<'a> {
    checks: Vec<DeferredCheck<'a>>,
}

impl<'a> GateChain<'a> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn check<F>(mut self, check: F) -> Self
    where
        F: FnOnce() -> RequirementCheck + 'a,
    {
        self.checks.push(Box::new(check));
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn evaluate_all(self) -> Vec<RequirementCheck> {
        check_multiple_requirements(self.checks)
    }

    pub fn first_failure(self) -> Option<Requirement> {
        self.checks
            .into_iter()
            .find_map(|check| check().into_failure())
    }

    /// Collapses the chain into a single check carrying the first failure.
    pub fn into_check(self) -> RequirementCheck {
        match self.first_failure() {
            Some(requirement) => RequirementCheck::fail(requirement),
            None => RequirementCheck::pass(),
        }
    }
}
