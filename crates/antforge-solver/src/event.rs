//! Event system for colony monitoring.
//!
//! The engine reports its lifecycle through [`ColonyEventSupport`]:
//! solving started, one snapshot per completed iteration, and solving
//! ended. Listeners run synchronously on the engine thread in registration
//! order, so they must return quickly; [`ChannelEventListener`] hands the
//! events to another thread without blocking.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use antforge_solver::event::{ColonyEventListener, ColonyEventSupport};
//! use antforge_solver::snapshot::IterationSnapshot;
//!
//! #[derive(Debug)]
//! struct PrintBest;
//!
//! impl ColonyEventListener for PrintBest {
//!     fn on_iteration_completed(&self, snapshot: &IterationSnapshot) {
//!         println!("{}: {}", snapshot.iteration, snapshot.best_distance);
//!     }
//! }
//!
//! let mut support = ColonyEventSupport::new();
//! support.add_listener(Arc::new(PrintBest));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::snapshot::{IterationSnapshot, RunOutcome};
use crate::termination::Completion;

/// Owned event delivered over a channel.
#[derive(Debug, Clone)]
pub enum ColonyEvent {
    Started { city_count: usize },
    Iteration(IterationSnapshot),
    Finished(RunOutcome),
}

/// Listener for colony lifecycle events.
pub trait ColonyEventListener: Send + Sync + Debug {
    /// Called once before the first iteration.
    fn on_solving_started(&self, _city_count: usize) {}

    /// Called after every completed iteration.
    fn on_iteration_completed(&self, snapshot: &IterationSnapshot);

    /// Called once when the run finishes, however it finishes.
    fn on_solving_ended(&self, _outcome: &RunOutcome) {}
}

/// Central event broadcaster for colony events.
pub struct ColonyEventSupport {
    listeners: Vec<Arc<dyn ColonyEventListener>>,
}

impl ColonyEventSupport {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ColonyEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn fire_solving_started(&self, city_count: usize) {
        for listener in &self.listeners {
            listener.on_solving_started(city_count);
        }
    }

    pub fn fire_iteration_completed(&self, snapshot: &IterationSnapshot) {
        for listener in &self.listeners {
            listener.on_iteration_completed(snapshot);
        }
    }

    pub fn fire_solving_ended(&self, outcome: &RunOutcome) {
        for listener in &self.listeners {
            listener.on_solving_ended(outcome);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Default for ColonyEventSupport {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ColonyEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColonyEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a listener whose messages carry `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ColonyEventListener for LoggingEventListener {
    fn on_solving_started(&self, city_count: usize) {
        info!(prefix = %self.prefix, city_count, "Colony started");
    }

    fn on_iteration_completed(&self, snapshot: &IterationSnapshot) {
        debug!(
            prefix = %self.prefix,
            iteration = snapshot.iteration,
            best_distance = snapshot.best_distance,
            "Iteration completed"
        );
    }

    fn on_solving_ended(&self, outcome: &RunOutcome) {
        match outcome.completion {
            Completion::BudgetExhausted => {
                info!(prefix = %self.prefix, iterations = outcome.iterations_run, "Colony finished")
            }
            Completion::EarlyStopped { threshold, streak } => info!(
                prefix = %self.prefix,
                iterations = outcome.iterations_run,
                threshold,
                streak,
                "Colony finished early"
            ),
            Completion::Cancelled => {
                info!(prefix = %self.prefix, iterations = outcome.iterations_run, "Colony cancelled")
            }
        }
    }
}

/// Counts event occurrences.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    started_count: AtomicUsize,
    iteration_count: AtomicUsize,
    ended_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started_count(&self) -> usize {
        self.started_count.load(Ordering::SeqCst)
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count.load(Ordering::SeqCst)
    }

    pub fn ended_count(&self) -> usize {
        self.ended_count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.started_count.store(0, Ordering::SeqCst);
        self.iteration_count.store(0, Ordering::SeqCst);
        self.ended_count.store(0, Ordering::SeqCst);
    }
}

impl ColonyEventListener for CountingEventListener {
    fn on_solving_started(&self, _city_count: usize) {
        self.started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_iteration_completed(&self, _snapshot: &IterationSnapshot) {
        self.iteration_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _outcome: &RunOutcome) {
        self.ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Forwards owned events over an unbounded channel.
///
/// Sending never blocks. Once the receiver is dropped, events are discarded
/// and the run continues.
#[derive(Debug, Clone)]
pub struct ChannelEventListener {
    sender: UnboundedSender<ColonyEvent>,
}

impl ChannelEventListener {
    pub fn new(sender: UnboundedSender<ColonyEvent>) -> Self {
        Self { sender }
    }

    fn send(&self, event: ColonyEvent) {
        let _ = self.sender.send(event);
    }
}

impl ColonyEventListener for ChannelEventListener {
    fn on_solving_started(&self, city_count: usize) {
        self.send(ColonyEvent::Started { city_count });
    }

    fn on_iteration_completed(&self, snapshot: &IterationSnapshot) {
        self.send(ColonyEvent::Iteration(snapshot.clone()));
    }

    fn on_solving_ended(&self, outcome: &RunOutcome) {
        self.send(ColonyEvent::Finished(outcome.clone()));
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
