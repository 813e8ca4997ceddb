//! antforge Solver Engine
//!
//! This crate provides the ant colony optimizer:
//! - Pheromone field and its update rules
//! - Probabilistic tour construction (ants)
//! - The colony iteration loop
//! - Termination conditions (budget, convergence, cancellation)
//! - Event system for monitoring
//! - Solver thread with event streaming

pub mod ant;
pub mod colony;
pub mod event;
pub mod pheromone;
pub mod realtime;
pub mod scope;
pub mod snapshot;
pub mod statistics;
pub mod termination;

pub use ant::{Ant, ConstructedTour, Selection, TourBuilder};
pub use colony::ColonyEngine;
pub use event::{
    ChannelEventListener, ColonyEvent, ColonyEventListener, ColonyEventSupport,
    CountingEventListener, LoggingEventListener,
};
pub use pheromone::PheromoneField;
pub use realtime::{spawn_solver, ColonyHandle, SpawnedColony};
pub use snapshot::{IterationSnapshot, RunOutcome};
pub use statistics::{Improvement, RunStatistics, StatisticsCollector};
pub use termination::{Completion, ConvergenceDecision, ConvergenceTracker};
