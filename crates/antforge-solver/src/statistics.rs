//! Run statistics collection.
//!
//! [`StatisticsCollector`] counts what happens during a run. The engine
//! records on its own thread, in ant order, after each construction phase.
//! [`RunStatistics`] is the immutable summary attached to a run outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::ant::ConstructedTour;

/// Record of a best-tour improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct Improvement {
    /// Time since the run started.
    pub time_offset: Duration,
    /// 1-based iteration that produced the improvement.
    pub iteration: usize,
    /// New best distance.
    pub distance: f64,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    pub iterations: u64,
    pub tours_constructed: u64,
    /// Tours that stopped before visiting every city.
    pub partial_tours: u64,
    /// Selections resolved by uniform choice because every weight was zero.
    pub degenerate_selections: u64,
    /// Selections where roulette sampling failed on non-finite weights.
    pub fallback_selections: u64,
    pub improvements: Vec<Improvement>,
    pub duration: Duration,
}

impl RunStatistics {
    pub fn improvement_count(&self) -> usize {
        self.improvements.len()
    }

    /// Average wall time per iteration.
    pub fn avg_time_per_iteration(&self) -> Duration {
        if self.iterations == 0 {
            Duration::ZERO
        } else {
            self.duration / self.iterations as u32
        }
    }
}

/// Thread-safe collector for run statistics.
#[derive(Debug)]
pub struct StatisticsCollector {
    start_time: Instant,
    iterations: AtomicU64,
    tours_constructed: AtomicU64,
    partial_tours: AtomicU64,
    degenerate_selections: AtomicU64,
    fallback_selections: AtomicU64,
    improvements: Mutex<Vec<Improvement>>,
}

impl StatisticsCollector {
    /// Creates a collector; the clock starts now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            iterations: AtomicU64::new(0),
            tours_constructed: AtomicU64::new(0),
            partial_tours: AtomicU64::new(0),
            degenerate_selections: AtomicU64::new(0),
            fallback_selections: AtomicU64::new(0),
            improvements: Mutex::new(Vec::new()),
        }
    }

    pub fn record_iteration(&self) {
        self.iterations.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one constructed tour.
    pub fn record_tour(&self, built: &ConstructedTour) {
        self.tours_constructed.fetch_add(1, Ordering::Relaxed);
        if !built.complete {
            self.partial_tours.fetch_add(1, Ordering::Relaxed);
        }
        self.degenerate_selections
            .fetch_add(built.degenerate_selections, Ordering::Relaxed);
        self.fallback_selections
            .fetch_add(built.fallback_selections, Ordering::Relaxed);
    }

    pub fn record_improvement(&self, iteration: usize, distance: f64) {
        let improvement = Improvement {
            time_offset: self.start_time.elapsed(),
            iteration,
            distance,
        };
        if let Ok(mut improvements) = self.improvements.lock() {
            improvements.push(improvement);
        }
    }

    /// Takes a snapshot without consuming the collector.
    pub fn snapshot(&self) -> RunStatistics {
        let improvements = match self.improvements.lock() {
            Ok(improvements) => improvements.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        RunStatistics {
            iterations: self.iterations.load(Ordering::Relaxed),
            tours_constructed: self.tours_constructed.load(Ordering::Relaxed),
            partial_tours: self.partial_tours.load(Ordering::Relaxed),
            degenerate_selections: self.degenerate_selections.load(Ordering::Relaxed),
            fallback_selections: self.fallback_selections.load(Ordering::Relaxed),
            improvements,
            duration: self.start_time.elapsed(),
        }
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}
