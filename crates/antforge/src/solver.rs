//! Solver entry points that hide engine wiring.

use std::path::Path;

use antforge_config::ColonyConfig;
use antforge_core::{Point, Result};
use antforge_solver::{ColonyEngine, RunOutcome};

use crate::instance::load_points;

/// Configuration file read from the working directory by [`run_colony`].
pub const CONFIG_FILE: &str = "colony.toml";

/// Solves `points` with an explicit configuration.
pub fn solve_points(points: &[Point], config: ColonyConfig) -> Result<RunOutcome> {
    let mut engine = ColonyEngine::new(points, config)?;
    Ok(engine.solve())
}

/// Solves `points` with `colony.toml` from the working directory, or the
/// defaults when it is missing.
///
/// With the `console` feature, colored progress output is enabled.
pub fn run_colony(points: &[Point]) -> Result<RunOutcome> {
    #[cfg(feature = "console")]
    antforge_console::init();

    let config = ColonyConfig::load(CONFIG_FILE).unwrap_or_default();
    solve_points(points, config)
}

/// Loads a point file and solves it like [`run_colony`].
pub fn run_colony_file(path: impl AsRef<Path>) -> Result<RunOutcome> {
    let points = load_points(path)?;
    run_colony(&points)
}
