//! Owned views of run progress handed to observers.

use antforge_core::Tour;

use crate::statistics::RunStatistics;
use crate::termination::Completion;

/// State published after every completed iteration.
///
/// Every field is an owned copy; the engine keeps mutating its own state
/// after the snapshot is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationSnapshot {
    /// 1-based iteration number.
    pub iteration: usize,
    pub iteration_budget: usize,
    /// Best tour so far as city indices, start city first.
    pub best_route: Vec<usize>,
    pub best_distance: f64,
    /// Percent above the reference optimum; negative when the best tour
    /// beats it. `None` without a reference.
    pub gap_percent: Option<f64>,
    /// Best distance after each iteration up to and including this one.
    pub history: Vec<f64>,
}

impl IterationSnapshot {
    /// Route as 1-based city labels.
    pub fn route_labels(&self) -> Vec<usize> {
        self.best_route.iter().map(|&city| city + 1).collect()
    }
}

/// Percentage difference between `best` and `reference`.
///
/// ```
/// use antforge_solver::snapshot::gap_percent;
///
/// assert_eq!(gap_percent(110.0, 100.0), 10.0);
/// assert_eq!(gap_percent(90.0, 100.0), -10.0);
/// ```
pub fn gap_percent(best: f64, reference: f64) -> f64 {
    (best - reference) / reference * 100.0
}

/// Final result of a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub completion: Completion,
    /// `None` only if the run was cancelled before its first iteration.
    pub best_tour: Option<Tour>,
    pub history: Vec<f64>,
    pub iterations_run: usize,
    pub statistics: RunStatistics,
}

impl RunOutcome {
    pub fn best_distance(&self) -> Option<f64> {
        self.best_tour.as_ref().map(Tour::distance)
    }

    pub fn is_terminated_early(&self) -> bool {
        self.completion.is_terminated_early()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_labels_are_one_based() {
        let snapshot = IterationSnapshot {
            iteration: 1,
            iteration_budget: 10,
            best_route: vec![0, 2, 1],
            best_distance: 3.0,
            gap_percent: None,
            history: vec![3.0],
        };
        assert_eq!(snapshot.route_labels(), vec![1, 3, 2]);
    }

    #[test]
    fn test_gap_percent_can_be_negative() {
        assert!(gap_percent(95.0, 100.0) < 0.0);
        assert_eq!(gap_percent(100.0, 100.0), 0.0);
    }
}
