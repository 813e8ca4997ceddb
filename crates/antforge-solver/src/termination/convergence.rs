//! Adaptive early stopping based on relative improvement.

use antforge_config::ConvergenceConfig;

/// Outcome of observing one iteration's best distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvergenceDecision {
    /// Keep iterating.
    Continue,

    /// Stagnation limit reached.
    Stop { threshold: f64, streak: u64 },
}

/// Tracks consecutive iterations whose relative improvement stays below a
/// threshold.
///
/// The first observation only records the baseline. Every later one
/// computes `|previous - best| / previous`; a value below the threshold
/// extends the streak, anything else resets it. Reaching the limit stops the
/// run.
///
/// # Example
///
/// ```
/// use antforge_solver::termination::{ConvergenceDecision, ConvergenceTracker};
///
/// let mut tracker = ConvergenceTracker::new(0.001, 2);
/// assert_eq!(tracker.observe(100.0), ConvergenceDecision::Continue);
/// assert_eq!(tracker.observe(100.0), ConvergenceDecision::Continue);
/// assert_eq!(
///     tracker.observe(100.0),
///     ConvergenceDecision::Stop { threshold: 0.001, streak: 2 }
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    threshold: f64,
    limit: u64,
    previous_best: Option<f64>,
    streak: u64,
    history: Vec<f64>,
}

impl ConvergenceTracker {
    pub fn new(threshold: f64, limit: u64) -> Self {
        Self {
            threshold,
            limit,
            previous_best: None,
            streak: 0,
            history: Vec::new(),
        }
    }

    pub fn from_config(config: &ConvergenceConfig) -> Self {
        Self::new(config.improvement_threshold, config.no_improvement_limit)
    }

    /// Records the best distance after an iteration and decides whether to
    /// stop.
    pub fn observe(&mut self, best: f64) -> ConvergenceDecision {
        self.history.push(best);

        let Some(previous) = self.previous_best.replace(best) else {
            return ConvergenceDecision::Continue;
        };

        let relative = ((previous - best) / previous).abs();
        // NaN (zero-length tours) never counts as stagnation.
        if relative < self.threshold {
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        if self.streak >= self.limit {
            ConvergenceDecision::Stop {
                threshold: self.threshold,
                streak: self.streak,
            }
        } else {
            ConvergenceDecision::Continue
        }
    }

    /// Consecutive stagnant iterations so far.
    pub fn streak(&self) -> u64 {
        self.streak
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Best distance after every observed iteration.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn into_history(self) -> Vec<f64> {
        self.history
    }
}
