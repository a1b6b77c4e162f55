//! Navigation invariants checked after every rendered frame.
//!
//! A check looks at one [`SystemSnapshot`] of the book and reports whether a
//! property that must hold for every reachable state still holds: the index
//! stays in range, at most one page is in motion, settled pages agree with
//! the index. Scripted scenarios and property tests share the same registry.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.check_all(&SystemSnapshot::from_app(&app))?;
//! ```

use std::fmt;

mod checks;
mod snapshot;

pub use checks::{
    AnimatingIffFlipping, AtMostOneFlipping, IdleLayout, IndexInBounds, IndicatorInStep,
    LabelMatchesIndex,
};
pub use snapshot::SystemSnapshot;

/// Outcome of a single check.
pub type InvariantResult = Result<(), Violation>;

/// A broken invariant and what was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the check that failed.
    pub invariant: &'static str,
    /// Observed state in words.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property of the book that holds in every reachable state.
pub trait Invariant: Send + Sync {
    /// Stable name used in violation reports.
    fn name(&self) -> &'static str;

    /// Inspect one snapshot.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// Ordered set of checks run together.
#[derive(Default)]
pub struct InvariantRegistry {
    checks: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Registry with no checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every navigation invariant in this module.
    pub fn standard() -> Self {
        let checks: Vec<Box<dyn Invariant>> = vec![
            Box::new(IndexInBounds),
            Box::new(AtMostOneFlipping),
            Box::new(AnimatingIffFlipping),
            Box::new(IdleLayout),
            Box::new(LabelMatchesIndex),
            Box::new(IndicatorInStep),
        ];
        Self { checks }
    }

    /// Register another check. Checks run in insertion order.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.checks.push(Box::new(invariant));
    }

    /// Run every check, collecting all violations rather than stopping at
    /// the first.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for check in &self.checks {
            if let Err(violation) = check.check(state) {
                violations.push(violation);
            }
        }
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Names of the registered checks, in run order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|check| check.name())
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
