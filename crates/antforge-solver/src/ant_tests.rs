//! Tests for tour construction.

use super::*;
use antforge_core::Point;
use antforge_test::geometry::{regular_polygon, two_points, unit_square};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn matrix(points: &[Point]) -> DistanceMatrix {
    DistanceMatrix::from_points(points).unwrap()
}

#[test]
fn test_ant_starts_on_start_city() {
    let ant = Ant::new(2, 5);
    assert_eq!(ant.current(), 2);
    assert_eq!(ant.route(), &[2]);
    assert!(ant.is_visited(2));
    assert_eq!(ant.visited().iter().filter(|&&v| v).count(), 1);
    assert!(!ant.has_completed_tour());
}

#[test]
fn test_ant_move_to_records_visit() {
    let mut ant = Ant::new(0, 2);
    ant.move_to(1);
    assert_eq!(ant.current(), 1);
    assert!(ant.is_visited(1));
    assert!(ant.has_completed_tour());
    assert_eq!(ant.into_route(), vec![0, 1]);
}

#[test]
fn test_construct_two_points() {
    let distances = matrix(&two_points());
    let pheromone = PheromoneField::new(2);
    let builder = TourBuilder::new(&distances, &pheromone, 1.0, 2.0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let built = builder.construct(0, &mut rng);
    assert!(built.complete);
    assert_eq!(built.tour.cities(), &[0, 1]);
    assert_eq!(built.tour.distance(), 10.0);
    assert_eq!(built.degenerate_selections, 0);
}

#[test]
fn test_construct_yields_permutation_from_start() {
    let distances = matrix(&regular_polygon(12, 10.0));
    let pheromone = PheromoneField::new(12);
    let builder = TourBuilder::new(&distances, &pheromone, 1.0, 2.0);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for start in [0, 5, 11] {
        let built = builder.construct(start, &mut rng);
        assert!(built.complete);
        assert!(built.tour.is_complete(12));
        assert_eq!(built.tour.cities()[0], start);
        let expected = distances.round_trip_length(built.tour.cities());
        assert_eq!(built.tour.distance(), expected);
    }
}

#[test]
fn test_construct_is_deterministic_for_seed() {
    let distances = matrix(&regular_polygon(15, 3.0));
    let pheromone = PheromoneField::new(15);
    let builder = TourBuilder::new(&distances, &pheromone, 1.0, 1.0);

    let a = builder.construct(0, &mut ChaCha8Rng::seed_from_u64(99));
    let b = builder.construct(0, &mut ChaCha8Rng::seed_from_u64(99));
    assert_eq!(a.tour, b.tour);
}

#[test]
fn test_strong_heuristic_prefers_nearest_city() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1000.0, 0.0),
    ];
    let distances = matrix(&points);
    let pheromone = PheromoneField::new(3);
    let builder = TourBuilder::new(&distances, &pheromone, 1.0, 10.0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let ant = Ant::new(0, 3);
    let mut weights = vec![0.0; 3];

    for _ in 0..50 {
        let selection = builder.select_next(&ant, &mut weights, &mut rng);
        assert_eq!(selection, Some(Selection::Roulette(1)));
    }
    assert_eq!(weights[0], 0.0);
}

#[test]
fn test_underflowing_weights_fall_back_to_uniform_choice() {
    let points = regular_polygon(6, 1.0e6);
    let distances = matrix(&points);
    let pheromone = PheromoneField::new(6);
    // (1 / 1e6)^400 underflows to zero.
    let builder = TourBuilder::new(&distances, &pheromone, 1.0, 400.0);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let built = builder.construct(0, &mut rng);
    assert!(built.complete);
    assert!(built.tour.is_complete(6));
    assert_eq!(built.degenerate_selections, 5);
    assert_eq!(built.fallback_selections, 0);
}

#[test]
fn test_non_finite_weights_take_first_unvisited_city() {
    let points = regular_polygon(4, 1.0e6);
    let distances = matrix(&points);
    let mut pheromone = PheromoneField::new(4);
    for i in 0..4 {
        for j in (i + 1)..4 {
            pheromone.deposit(i, j, 1.0e10);
        }
    }
    // tau^40 overflows to infinity and eta^400 underflows to zero, so every
    // candidate weight is NaN.
    let builder = TourBuilder::new(&distances, &pheromone, 40.0, 400.0);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let ant = Ant::new(0, 4);
    let mut weights = vec![0.0; 4];
    let selection = builder.select_next(&ant, &mut weights, &mut rng);
    assert_eq!(selection, Some(Selection::Fallback(1)));
    assert!(weights[1..].iter().all(|w| w.is_nan()));

    let built = builder.construct(0, &mut rng);
    assert!(built.complete);
    assert_eq!(built.tour.cities(), &[0, 1, 2, 3]);
    assert_eq!(built.fallback_selections, 3);
    assert_eq!(built.degenerate_selections, 0);
}

#[test]
fn test_select_next_returns_none_when_all_visited() {
    let distances = matrix(&unit_square());
    let pheromone = PheromoneField::new(4);
    let builder = TourBuilder::new(&distances, &pheromone, 1.0, 2.0);
    let mut ant = Ant::new(0, 4);
    for city in 1..4 {
        ant.move_to(city);
    }
    let mut weights = vec![0.0; 4];

    let selection = builder.select_next(&ant, &mut weights, &mut ChaCha8Rng::seed_from_u64(0));
    assert_eq!(selection, None);
}

#[test]
fn test_weight_combines_pheromone_and_distance() {
    let distances = matrix(&two_points());
    let mut pheromone = PheromoneField::new(2);
    pheromone.deposit(0, 1, 3.0);
    let builder = TourBuilder::new(&distances, &pheromone, 2.0, 1.0);

    let expected = 16.0 * (1.0 / (5.0 + DISTANCE_EPSILON));
    assert!((builder.weight(0, 1) - expected).abs() < 1e-12);
}

proptest! {
    #[test]
    fn prop_selection_never_picks_visited_or_current(
        seed in any::<u64>(),
        visited_mask in prop::collection::vec(any::<bool>(), 8),
        current in 0usize..8,
    ) {
        let distances = matrix(&regular_polygon(8, 5.0));
        let pheromone = PheromoneField::new(8);
        let builder = TourBuilder::new(&distances, &pheromone, 1.0, 2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // The ant ends up standing on the last city it moved to.
        let mut ant = Ant::new(current, 8);
        for (city, &visit) in visited_mask.iter().enumerate() {
            if visit && city != current {
                ant.move_to(city);
            }
        }

        let mut weights = vec![0.0; 8];
        match builder.select_next(&ant, &mut weights, &mut rng) {
            Some(selection) => {
                let city = selection.city();
                prop_assert!(city != ant.current());
                prop_assert!(!ant.is_visited(city));
            }
            None => prop_assert!(ant.has_completed_tour()),
        }
    }

    #[test]
    fn prop_constructed_tours_are_permutations(seed in any::<u64>(), n in 2usize..20) {
        let distances = matrix(&regular_polygon(n, 7.0));
        let pheromone = PheromoneField::new(n);
        let builder = TourBuilder::new(&distances, &pheromone, 1.0, 2.0);

        let built = builder.construct(seed as usize % n, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert!(built.complete);
        prop_assert!(built.tour.is_complete(n));
        let sum: f64 = built.tour.edges().map(|(a, b)| distances.get(a, b)).sum();
        prop_assert!((sum - built.tour.distance()).abs() < 1e-9);
    }
}
