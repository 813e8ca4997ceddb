//! Termination conditions for a colony run.
//!
//! A run ends in one of three ways: the iteration budget is exhausted, the
//! [`ConvergenceTracker`] detects stagnation, or an external cancellation is
//! observed at an iteration boundary.

mod convergence;
mod external;

pub use convergence::{ConvergenceDecision, ConvergenceTracker};
pub use external::ExternalTermination;

/// How a run finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    /// Every iteration of the budget ran.
    BudgetExhausted,

    /// Relative improvement stayed below `threshold` for `streak`
    /// consecutive iterations.
    EarlyStopped { threshold: f64, streak: u64 },

    /// Cancellation was requested through a handle.
    Cancelled,
}

impl Completion {
    /// Returns true if the run ended before its iteration budget.
    pub fn is_terminated_early(&self) -> bool {
        !matches!(self, Completion::BudgetExhausted)
    }
}
