//! Mutable state of a single run.

use antforge_core::Tour;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Best-so-far bookkeeping and the master random stream of a run.
///
/// The best distance starts at positive infinity and never increases: a tour
/// replaces the incumbent only when it is strictly shorter.
#[derive(Debug)]
pub struct RunState {
    best_tour: Option<Tour>,
    best_distance: f64,
    rng: ChaCha8Rng,
}

impl RunState {
    /// Seeded from `seed`, or from OS entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            best_tour: None,
            best_distance: f64::INFINITY,
            rng,
        }
    }

    /// Draws one seed per ant for the next construction round, in ant order.
    pub fn ant_seeds(&mut self, ant_count: usize) -> Vec<u64> {
        (0..ant_count).map(|_| self.rng.random::<u64>()).collect()
    }

    /// Offers a candidate tour; returns true if it became the new best.
    pub fn offer(&mut self, tour: &Tour) -> bool {
        if tour.distance() < self.best_distance {
            self.best_distance = tour.distance();
            self.best_tour = Some(tour.clone());
            true
        } else {
            false
        }
    }

    pub fn best_tour(&self) -> Option<&Tour> {
        self.best_tour.as_ref()
    }

    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    pub fn into_best_tour(self) -> Option<Tour> {
        self.best_tour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antforge_core::DistanceMatrix;
    use antforge_test::geometry::unit_square;

    #[test]
    fn test_offer_keeps_incumbent_on_tie() {
        let matrix = DistanceMatrix::from_points(&unit_square()).unwrap();
        let first = Tour::new(vec![0, 1, 2, 3], &matrix);
        let tied = Tour::new(vec![0, 3, 2, 1], &matrix);
        let worse = Tour::new(vec![0, 2, 1, 3], &matrix);

        let mut state = RunState::new(Some(1));
        assert_eq!(state.best_distance(), f64::INFINITY);
        assert!(state.offer(&worse));
        assert!(state.offer(&first));
        assert!(!state.offer(&tied));
        assert_eq!(state.best_tour(), Some(&first));
        assert_eq!(state.best_distance(), 4.0);
    }

    #[test]
    fn test_seeded_state_draws_same_ant_seeds() {
        let mut a = RunState::new(Some(42));
        let mut b = RunState::new(Some(42));
        assert_eq!(a.ant_seeds(5), b.ant_seeds(5));
        assert_eq!(a.ant_seeds(3), b.ant_seeds(3));
    }
}
