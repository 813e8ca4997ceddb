//! Pheromone intensities over city pairs.

use antforge_core::Tour;

/// Lower bound every intensity is clamped to after evaporation.
pub const PHEROMONE_FLOOR: f64 = 1e-6;

/// Intensity every pair starts with.
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Square, symmetric matrix of pheromone intensities.
///
/// Every write touches both `(i, j)` and `(j, i)`, so the matrix stays
/// symmetric. The diagonal is initialized like every other entry but never
/// read by tour construction.
///
/// Within one iteration the engine applies updates in a fixed order:
/// [`evaporate`](Self::evaporate), then [`deposit_tour`](Self::deposit_tour)
/// for every ant, then [`reinforce_elite`](Self::reinforce_elite).
///
/// # Example
///
/// ```
/// use antforge_solver::pheromone::PheromoneField;
///
/// let mut field = PheromoneField::new(3);
/// field.evaporate(0.5);
/// field.deposit(0, 2, 0.25);
///
/// assert_eq!(field.get(0, 1), 0.5);
/// assert_eq!(field.get(0, 2), 0.75);
/// assert_eq!(field.get(2, 0), 0.75);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneField {
    n: usize,
    intensities: Vec<f64>,
}

impl PheromoneField {
    /// Creates a field for `n` cities with every entry at [`INITIAL_PHEROMONE`].
    pub fn new(n: usize) -> Self {
        Self {
            n,
            intensities: vec![INITIAL_PHEROMONE; n * n],
        }
    }

    /// Resets every entry to [`INITIAL_PHEROMONE`].
    pub fn initialize(&mut self) {
        self.intensities.fill(INITIAL_PHEROMONE);
    }

    pub fn city_count(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.intensities[i * self.n + j]
    }

    /// Intensities from city `i` to every city, in index order.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.intensities[i * self.n..(i + 1) * self.n]
    }

    /// Multiplies every entry by `1 - rho`, then clamps to [`PHEROMONE_FLOOR`].
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for value in &mut self.intensities {
            *value *= keep;
            if *value < PHEROMONE_FLOOR {
                *value = PHEROMONE_FLOOR;
            }
        }
    }

    /// Adds `amount` to both directions of edge `(i, j)`.
    #[inline]
    pub fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        self.intensities[i * self.n + j] += amount;
        self.intensities[j * self.n + i] += amount;
    }

    /// Deposits `deposit_scale / length` on every edge of `tour`, closing
    /// edge included.
    ///
    /// Tours of zero length (all cities coincident) deposit nothing.
    pub fn deposit_tour(&mut self, tour: &Tour, deposit_scale: f64) {
        if let Some(amount) = proportional_amount(deposit_scale, tour.distance()) {
            self.deposit_edges(tour, amount);
        }
    }

    /// Deposits `weight * deposit_scale / length` on every edge of the best
    /// tour.
    pub fn reinforce_elite(&mut self, best: &Tour, weight: f64, deposit_scale: f64) {
        if let Some(amount) = proportional_amount(deposit_scale, best.distance()) {
            self.deposit_edges(best, weight * amount);
        }
    }

    fn deposit_edges(&mut self, tour: &Tour, amount: f64) {
        for (a, b) in tour.edges() {
            self.deposit(a, b, amount);
        }
    }

    /// Smallest entry, off-diagonal or not.
    pub fn min_intensity(&self) -> f64 {
        self.intensities.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

fn proportional_amount(deposit_scale: f64, length: f64) -> Option<f64> {
    if length > 0.0 {
        Some(deposit_scale / length)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antforge_core::{DistanceMatrix, Point};
    use proptest::prelude::*;

    fn square_tour() -> Tour {
        let matrix = DistanceMatrix::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap();
        Tour::new(vec![0, 1, 2, 3], &matrix)
    }

    #[test]
    fn test_new_field_is_uniform() {
        let field = PheromoneField::new(4);
        assert_eq!(field.city_count(), 4);
        assert!(field.row(2).iter().all(|&v| v == INITIAL_PHEROMONE));
    }

    #[test]
    fn test_evaporate_clamps_to_floor() {
        let mut field = PheromoneField::new(3);
        for _ in 0..20 {
            field.evaporate(0.9);
        }
        assert_eq!(field.min_intensity(), PHEROMONE_FLOOR);
        assert_eq!(field.get(0, 1), PHEROMONE_FLOOR);
    }

    #[test]
    fn test_deposit_tour_covers_closing_edge() {
        let mut field = PheromoneField::new(4);
        field.deposit_tour(&square_tour(), 8.0);

        // Q / length = 8 / 4
        assert_eq!(field.get(0, 1), 3.0);
        assert_eq!(field.get(3, 0), 3.0);
        assert_eq!(field.get(0, 3), 3.0);
        assert_eq!(field.get(0, 2), 1.0);
    }

    #[test]
    fn test_reinforce_elite_scales_by_weight() {
        let mut field = PheromoneField::new(4);
        field.reinforce_elite(&square_tour(), 1.5, 4.0);

        assert_eq!(field.get(1, 2), 2.5);
        assert_eq!(field.get(2, 1), 2.5);
        assert_eq!(field.get(1, 3), 1.0);
    }

    #[test]
    fn test_zero_rate_and_zero_scale_keep_field_unchanged() {
        let mut field = PheromoneField::new(4);
        field.evaporate(0.0);
        field.deposit_tour(&square_tour(), 0.0);
        field.reinforce_elite(&square_tour(), 2.0, 0.0);
        assert_eq!(field, PheromoneField::new(4));
    }

    #[test]
    fn test_initialize_resets_field() {
        let mut field = PheromoneField::new(3);
        field.deposit(0, 1, 5.0);
        field.initialize();
        assert_eq!(field, PheromoneField::new(3));
    }

    proptest! {
        #[test]
        fn prop_evaporation_never_drops_below_floor(
            rho in 0.0..1.0f64,
            rounds in 1usize..60,
            deposits in prop::collection::vec((0usize..5, 0usize..5, 0.0..10.0f64), 0..10),
        ) {
            let mut field = PheromoneField::new(5);
            for (i, j, amount) in deposits {
                field.deposit(i, j, amount);
            }
            for _ in 0..rounds {
                field.evaporate(rho);
                prop_assert!(field.min_intensity() >= PHEROMONE_FLOOR);
            }
            for i in 0..5 {
                for j in 0..5 {
                    prop_assert_eq!(field.get(i, j), field.get(j, i));
                }
            }
        }
    }
}
