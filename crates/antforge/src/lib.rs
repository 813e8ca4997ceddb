//! antforge - Ant Colony Optimization for Round-Trip Tours
//!
//! Finds short closed tours through a set of planar points.
//!
//! # Example
//!
//! ```rust
//! use antforge::prelude::*;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//! ];
//! let config = ColonyConfig::new()
//!     .with_ant_count(10)
//!     .with_iteration_budget(30)
//!     .with_random_seed(42);
//!
//! let outcome = solve_points(&points, config).unwrap();
//! assert_eq!(outcome.best_distance(), Some(4.0));
//! ```

pub mod instance;
mod solver;

pub use solver::{run_colony, run_colony_file, solve_points, CONFIG_FILE};

pub use antforge_config::{
    AntThreadCount, ColonyConfig, ConfigError, ConvergenceConfig, EliteWeight, PheromoneConfig,
};
pub use antforge_core::{AntForgeError, DistanceMatrix, Point, Result, Tour};
pub use antforge_solver::{
    spawn_solver, ColonyEngine, ColonyEvent, ColonyEventListener, ColonyHandle, Completion,
    IterationSnapshot, RunOutcome, RunStatistics, SpawnedColony,
};

#[cfg(feature = "console")]
pub use antforge_console as console;

pub mod prelude {
    pub use super::{solve_points, spawn_solver};
    pub use super::{ColonyConfig, ColonyEngine, Completion, Point, RunOutcome, Tour};
}
