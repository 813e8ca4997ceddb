//! Running a colony off the caller's thread.
//!
//! [`spawn_solver`] moves a [`ColonyEngine`] onto a dedicated thread and
//! streams its events over an unbounded channel. The engine never waits for
//! the consumer: a slow or absent consumer only delays when events are read.

mod colony_handle;

pub use colony_handle::ColonyHandle;

use std::sync::Arc;
use std::thread::JoinHandle;

use antforge_config::ColonyConfig;
use antforge_core::{AntForgeError, Point, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::colony::ColonyEngine;
use crate::event::{ChannelEventListener, ColonyEvent};
use crate::snapshot::RunOutcome;

/// A colony running on its own thread.
#[derive(Debug)]
pub struct SpawnedColony {
    pub handle: ColonyHandle,
    pub events: UnboundedReceiver<ColonyEvent>,
    pub join: JoinHandle<RunOutcome>,
}

/// Validates the input, then solves on a new thread.
///
/// The receiver yields `Started`, one `Iteration` per completed iteration,
/// then `Finished`; the same outcome is returned by the join handle.
///
/// # Errors
///
/// Returns the engine's validation error without spawning, or
/// [`AntForgeError::Internal`] if the thread cannot be created.
///
/// # Example
///
/// ```
/// use antforge_config::ColonyConfig;
/// use antforge_core::Point;
/// use antforge_solver::event::ColonyEvent;
/// use antforge_solver::realtime::spawn_solver;
///
/// let points = vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)];
/// let config = ColonyConfig::new().with_iteration_budget(3).with_random_seed(1);
///
/// let mut colony = spawn_solver(points, config).unwrap();
/// let outcome = colony.join.join().unwrap();
/// assert_eq!(outcome.best_distance(), Some(10.0));
///
/// let mut iterations = 0;
/// while let Ok(event) = colony.events.try_recv() {
///     if let ColonyEvent::Iteration(_) = event {
///         iterations += 1;
///     }
/// }
/// assert_eq!(iterations, 3);
/// ```
pub fn spawn_solver(points: Vec<Point>, config: ColonyConfig) -> Result<SpawnedColony> {
    let mut engine = ColonyEngine::new(&points, config)?;
    let (sender, events) = mpsc::unbounded_channel();
    engine.add_listener(Arc::new(ChannelEventListener::new(sender)));
    let handle = engine.handle();

    let join = std::thread::Builder::new()
        .name("antforge-colony".to_string())
        .spawn(move || engine.solve())
        .map_err(|e| AntForgeError::Internal(format!("failed to spawn solver thread: {e}")))?;

    Ok(SpawnedColony {
        handle,
        events,
        join,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::Completion;
    use antforge_test::geometry::{grid, two_points};

    #[test]
    fn test_spawn_rejects_invalid_input() {
        let err = spawn_solver(vec![Point::new(0.0, 0.0)], ColonyConfig::default()).unwrap_err();
        assert!(matches!(err, AntForgeError::InvalidInput(_)));
    }

    #[test]
    fn test_spawned_colony_streams_events_in_order() {
        let config = ColonyConfig::new()
            .with_ant_count(4)
            .with_iteration_budget(5)
            .with_random_seed(3);
        let mut colony = spawn_solver(two_points(), config).unwrap();
        let outcome = colony.join.join().unwrap();

        let mut received = Vec::new();
        while let Ok(event) = colony.events.try_recv() {
            received.push(event);
        }

        assert!(matches!(received.first(), Some(ColonyEvent::Started { city_count: 2 })));
        assert!(matches!(received.last(), Some(ColonyEvent::Finished(_))));
        let iterations: Vec<usize> = received
            .iter()
            .filter_map(|event| match event {
                ColonyEvent::Iteration(snapshot) => Some(snapshot.iteration),
                _ => None,
            })
            .collect();
        assert_eq!(iterations, (1..=outcome.iterations_run).collect::<Vec<_>>());
    }

    #[test]
    fn test_cancel_before_first_iteration() {
        let config = ColonyConfig::new()
            .with_iteration_budget(1_000_000)
            .with_random_seed(5);
        let mut engine = ColonyEngine::new(&grid(3, 3), config).unwrap();
        engine.handle().terminate_early();

        let outcome = engine.solve();
        assert_eq!(outcome.completion, Completion::Cancelled);
        assert_eq!(outcome.iterations_run, 0);
        assert!(outcome.best_tour.is_none());
        assert!(!engine.handle().is_solving());
    }
}
