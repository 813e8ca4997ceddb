//! The iteration loop of the colony.
//!
//! Each iteration runs the same five steps:
//!
//! 1. **Construct**: every ant builds a tour from the start city. Ants only
//!    read shared state, so construction runs in parallel.
//! 2. **Evaluate**: tours are compared to the best-so-far in ant order; a
//!    strictly shorter tour replaces it.
//! 3. **Update**: evaporate, deposit for every ant, then reinforce the best
//!    tour with the elite weight.
//! 4. **Record**: append the best distance to the history and compute the
//!    gap to the reference optimum.
//! 5. **Publish**: hand an owned [`IterationSnapshot`] to the listeners.
//!
//! The convergence check and the cancellation flag are consulted at the
//! iteration boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use antforge_config::{AntThreadCount, ColonyConfig};
use antforge_core::{AntForgeError, DistanceMatrix, Point, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::ant::{ConstructedTour, TourBuilder};
use crate::event::{ColonyEventListener, ColonyEventSupport};
use crate::pheromone::PheromoneField;
use crate::realtime::ColonyHandle;
use crate::scope::RunState;
use crate::snapshot::{gap_percent, IterationSnapshot, RunOutcome};
use crate::statistics::StatisticsCollector;
use crate::termination::{Completion, ConvergenceDecision, ConvergenceTracker, ExternalTermination};

/// Ant colony optimizer for one point set.
///
/// # Example
///
/// ```
/// use antforge_config::ColonyConfig;
/// use antforge_core::Point;
/// use antforge_solver::ColonyEngine;
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// let config = ColonyConfig::new()
///     .with_ant_count(10)
///     .with_iteration_budget(20)
///     .with_random_seed(7);
///
/// let mut engine = ColonyEngine::new(&points, config).unwrap();
/// let outcome = engine.solve();
/// assert_eq!(outcome.best_distance(), Some(4.0));
/// ```
pub struct ColonyEngine {
    config: ColonyConfig,
    distances: DistanceMatrix,
    pheromone: PheromoneField,
    pool: Option<ThreadPool>,
    events: ColonyEventSupport,
    solving: Arc<AtomicBool>,
    termination: ExternalTermination,
}

impl ColonyEngine {
    /// Builds an engine after validating `config` against `points`.
    ///
    /// # Errors
    ///
    /// Returns [`AntForgeError::InvalidInput`] for an invalid configuration,
    /// fewer than two points, non-finite coordinates, or a start city
    /// outside the point set.
    pub fn new(points: &[Point], config: ColonyConfig) -> Result<Self> {
        config.validate()?;
        let distances = DistanceMatrix::from_points(points)?;
        let n = distances.city_count();
        if config.start_city >= n {
            return Err(AntForgeError::invalid(format!(
                "start_city {} is out of range for {} points",
                config.start_city, n
            )));
        }

        let pool = match config.ant_thread_count {
            AntThreadCount::Count(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("antforge-ant-{i}"))
                    .build()
                    .map_err(|e| AntForgeError::Internal(e.to_string()))?,
            ),
            AntThreadCount::Auto | AntThreadCount::None => None,
        };

        Ok(Self {
            config,
            distances,
            pheromone: PheromoneField::new(n),
            pool,
            events: ColonyEventSupport::new(),
            solving: Arc::new(AtomicBool::new(false)),
            termination: ExternalTermination::default(),
        })
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ColonyEventListener>) {
        self.events.add_listener(listener);
    }

    /// Handle for cancelling a run from another thread.
    pub fn handle(&self) -> ColonyHandle {
        ColonyHandle::new(Arc::clone(&self.solving), Arc::clone(self.termination.flag()))
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Pheromone field as left by the last iteration.
    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    /// Runs until the budget is exhausted, convergence stops the run, or
    /// cancellation is requested.
    ///
    /// Every call starts from a fresh pheromone field and, with a fixed seed,
    /// reproduces the same run.
    pub fn solve(&mut self) -> RunOutcome {
        let n = self.distances.city_count();
        let ant_count = self.config.ant_count;
        let budget = self.config.iteration_budget;

        let stats = StatisticsCollector::new();
        let mut state = RunState::new(self.config.random_seed);
        let mut tracker = ConvergenceTracker::from_config(&self.config.convergence);
        self.pheromone.initialize();
        self.solving.store(true, Ordering::SeqCst);

        info!(
            event = "solve_start",
            city_count = n,
            ant_count,
            iteration_budget = budget,
        );
        self.events.fire_solving_started(n);

        let mut completion = Completion::BudgetExhausted;
        let mut iterations_run = 0;

        for iteration in 0..budget {
            if self.termination.is_terminated() {
                info!(event = "cancelled", iterations = iterations_run);
                completion = Completion::Cancelled;
                break;
            }

            let tours = self.construct_tours(&state.ant_seeds(ant_count));

            for (ant, built) in tours.iter().enumerate() {
                stats.record_tour(built);
                if !built.complete {
                    warn!(
                        event = "partial_tour",
                        ant,
                        visited = built.tour.len(),
                        city_count = n,
                    );
                }
                if state.offer(&built.tour) {
                    stats.record_improvement(iteration + 1, built.tour.distance());
                    info!(
                        event = "new_best",
                        iteration = iteration + 1,
                        distance = built.tour.distance(),
                    );
                }
            }

            self.update_pheromone(iteration, &tours, &state);

            iterations_run = iteration + 1;
            stats.record_iteration();
            let decision = tracker.observe(state.best_distance());

            let snapshot = self.snapshot(iterations_run, &state, tracker.history());
            debug!(
                event = "iteration",
                iteration = snapshot.iteration,
                best_distance = snapshot.best_distance,
                gap_percent = snapshot.gap_percent,
            );
            self.events.fire_iteration_completed(&snapshot);

            if let ConvergenceDecision::Stop { threshold, streak } = decision {
                info!(event = "early_stop", threshold, streak);
                completion = Completion::EarlyStopped { threshold, streak };
                break;
            }
        }

        let statistics = stats.snapshot();
        let outcome = RunOutcome {
            completion,
            best_tour: state.into_best_tour(),
            history: tracker.into_history(),
            iterations_run,
            statistics,
        };

        self.solving.store(false, Ordering::SeqCst);
        self.termination.reset();
        info!(
            event = "solve_end",
            iterations = iterations_run,
            best_distance = outcome.best_distance(),
            duration_ms = outcome.statistics.duration.as_millis() as u64,
        );
        self.events.fire_solving_ended(&outcome);
        outcome
    }

    /// Builds one tour per seed, returned in seed order whatever the
    /// thread count.
    fn construct_tours(&self, seeds: &[u64]) -> Vec<ConstructedTour> {
        let builder = TourBuilder::new(
            &self.distances,
            &self.pheromone,
            self.config.pheromone.alpha,
            self.config.pheromone.beta,
        );
        let start = self.config.start_city;
        let build = |seed: &u64| builder.construct(start, &mut ChaCha8Rng::seed_from_u64(*seed));

        match (self.config.ant_thread_count, &self.pool) {
            (AntThreadCount::None, _) => seeds.iter().map(build).collect(),
            (_, Some(pool)) => pool.install(|| seeds.par_iter().map(build).collect()),
            (_, None) => seeds.par_iter().map(build).collect(),
        }
    }

    fn update_pheromone(&mut self, iteration: usize, tours: &[ConstructedTour], state: &RunState) {
        let pheromone = &self.config.pheromone;
        self.pheromone.evaporate(pheromone.evaporation_rate);
        for built in tours {
            self.pheromone.deposit_tour(&built.tour, pheromone.deposit_scale);
        }
        if let Some(best) = state.best_tour() {
            let weight = pheromone
                .elite_weight
                .weight_at(iteration, self.config.iteration_budget);
            if weight > 0.0 {
                self.pheromone
                    .reinforce_elite(best, weight, pheromone.deposit_scale);
            }
        }
    }

    fn snapshot(&self, iteration: usize, state: &RunState, history: &[f64]) -> IterationSnapshot {
        let best_distance = state.best_distance();
        IterationSnapshot {
            iteration,
            iteration_budget: self.config.iteration_budget,
            best_route: state
                .best_tour()
                .map(|tour| tour.cities().to_vec())
                .unwrap_or_default(),
            best_distance,
            gap_percent: self
                .config
                .reference_optimum
                .map(|reference| gap_percent(best_distance, reference)),
            history: history.to_vec(),
        }
    }
}

impl std::fmt::Debug for ColonyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColonyEngine")
            .field("city_count", &self.distances.city_count())
            .field("ant_count", &self.config.ant_count)
            .field("iteration_budget", &self.config.iteration_budget)
            .field("events", &self.events)
            .finish()
    }
}
