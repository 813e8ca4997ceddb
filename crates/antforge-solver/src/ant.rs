//! Probabilistic tour construction.
//!
//! An [`Ant`] walks from the start city, picking each next city by
//! roulette-wheel sampling over `pheromone^alpha * (1 / (distance + eps))^beta`.
//! Construction only reads the distance matrix and the pheromone field, so
//! any number of ants can build tours concurrently between two updates.

use antforge_core::{DistanceMatrix, Tour};
use rand::Rng;
use tracing::{trace, warn};

use crate::pheromone::PheromoneField;

/// Added to every distance before inversion so coincident points stay finite.
pub const DISTANCE_EPSILON: f64 = 1e-6;

/// In-progress tour state of one ant.
#[derive(Debug, Clone)]
pub struct Ant {
    current: usize,
    route: Vec<usize>,
    visited: Vec<bool>,
}

impl Ant {
    /// Places a fresh ant on `start` in a graph of `city_count` cities.
    pub fn new(start: usize, city_count: usize) -> Self {
        let mut visited = vec![false; city_count];
        visited[start] = true;
        let mut route = Vec::with_capacity(city_count);
        route.push(start);
        Self {
            current: start,
            route,
            visited,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Visit order so far, start city first.
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    pub fn is_visited(&self, city: usize) -> bool {
        self.visited[city]
    }

    pub fn visited(&self) -> &[bool] {
        &self.visited
    }

    /// Moves to `city` and marks it visited.
    pub fn move_to(&mut self, city: usize) {
        self.current = city;
        self.route.push(city);
        self.visited[city] = true;
    }

    pub fn has_completed_tour(&self) -> bool {
        self.route.len() == self.visited.len()
    }

    pub fn into_route(self) -> Vec<usize> {
        self.route
    }
}

/// How a next city was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Roulette-wheel sampling over candidate weights.
    Roulette(usize),

    /// Every candidate weight was zero; uniform choice among candidates.
    Uniform(usize),

    /// Roulette sampling found no city although candidates remained;
    /// first candidate in index order.
    Fallback(usize),
}

impl Selection {
    pub fn city(self) -> usize {
        match self {
            Selection::Roulette(city) | Selection::Uniform(city) | Selection::Fallback(city) => {
                city
            }
        }
    }
}

/// Result of one ant's construction.
#[derive(Debug, Clone)]
pub struct ConstructedTour {
    pub tour: Tour,

    /// Selections that fell back to a uniform choice.
    pub degenerate_selections: u64,

    /// Selections where roulette sampling failed and the first unvisited
    /// city was taken.
    pub fallback_selections: u64,

    /// False if construction stopped before visiting every city.
    pub complete: bool,
}

/// Builds tours from shared, read-only colony state.
#[derive(Debug, Clone, Copy)]
pub struct TourBuilder<'a> {
    distances: &'a DistanceMatrix,
    pheromone: &'a PheromoneField,
    alpha: f64,
    beta: f64,
}

impl<'a> TourBuilder<'a> {
    pub fn new(
        distances: &'a DistanceMatrix,
        pheromone: &'a PheromoneField,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            distances,
            pheromone,
            alpha,
            beta,
        }
    }

    /// Constructs one tour starting at `start`.
    ///
    /// Stops early only if no next city can be chosen while unvisited cities
    /// remain; the truncated route is still scored with the closing edge.
    pub fn construct<R: Rng>(&self, start: usize, rng: &mut R) -> ConstructedTour {
        let n = self.distances.city_count();
        let mut ant = Ant::new(start, n);
        let mut weights = vec![0.0; n];
        let mut degenerate_selections = 0;
        let mut fallback_selections = 0;

        while !ant.has_completed_tour() {
            match self.select_next(&ant, &mut weights, rng) {
                Some(selection) => {
                    match selection {
                        Selection::Uniform(_) => degenerate_selections += 1,
                        Selection::Fallback(_) => fallback_selections += 1,
                        Selection::Roulette(_) => {}
                    }
                    ant.move_to(selection.city());
                }
                None => break,
            }
        }

        let complete = ant.has_completed_tour();
        ConstructedTour {
            tour: Tour::new(ant.into_route(), self.distances),
            degenerate_selections,
            fallback_selections,
            complete,
        }
    }

    /// Weight of moving from `from` to `to`.
    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        let tau = self.pheromone.get(from, to).powf(self.alpha);
        let eta = (1.0 / (self.distances.get(from, to) + DISTANCE_EPSILON)).powf(self.beta);
        tau * eta
    }

    /// Chooses the ant's next city.
    ///
    /// `weights` is scratch space of length `n`; visited cities and the
    /// current city get weight zero. Returns `None` only if no unvisited city
    /// remains.
    pub fn select_next<R: Rng>(
        &self,
        ant: &Ant,
        weights: &mut [f64],
        rng: &mut R,
    ) -> Option<Selection> {
        let current = ant.current();
        let mut total = 0.0;
        for (city, weight) in weights.iter_mut().enumerate() {
            *weight = if city != current && !ant.is_visited(city) {
                self.weight(current, city)
            } else {
                0.0
            };
            total += *weight;
        }

        if total == 0.0 {
            let candidates: Vec<usize> = (0..weights.len())
                .filter(|&city| city != current && !ant.is_visited(city))
                .collect();
            if candidates.is_empty() {
                return None;
            }
            trace!(
                event = "degenerate_selection",
                city = current,
                candidates = candidates.len(),
            );
            let pick = candidates[rng.random_range(0..candidates.len())];
            return Some(Selection::Uniform(pick));
        }

        let r = rng.random::<f64>() * total;
        let mut acc = 0.0;
        for (city, &weight) in weights.iter().enumerate() {
            if city == current || ant.is_visited(city) {
                continue;
            }
            acc += weight;
            if acc >= r {
                return Some(Selection::Roulette(city));
            }
        }

        // Reachable only with non-finite totals.
        let fallback = (0..weights.len()).find(|&city| city != current && !ant.is_visited(city))?;
        warn!(
            event = "selection_fallback",
            city = current,
            chosen = fallback,
            total,
        );
        Some(Selection::Fallback(fallback))
    }
}

#[cfg(test)]
#[path = "ant_tests.rs"]
mod tests;
