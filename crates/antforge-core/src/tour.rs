//! Closed tours over city indices.

use crate::geometry::DistanceMatrix;

/// An ordered visit sequence, implicitly closed back to its first city,
/// together with its round-trip length.
///
/// A tour produced by a healthy ant is a permutation of all cities. A tour
/// truncated by a construction anomaly still carries a well-defined length
/// computed with the same closing-edge formula; [`Tour::is_complete`] tells
/// the two apart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    cities: Vec<usize>,
    distance: f64,
}

impl Tour {
    /// Scores `cities` against `matrix`.
    pub fn new(cities: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let distance = matrix.round_trip_length(&cities);
        Self { cities, distance }
    }

    /// Visit order, starting with the start city.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Round-trip length.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterates every undirected edge of the tour, closing edge last.
    ///
    /// Yields nothing for tours with fewer than two cities.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let closing = match (self.cities.first(), self.cities.last()) {
            (Some(&first), Some(&last)) if self.cities.len() > 1 => Some((last, first)),
            _ => None,
        };
        self.cities
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// Returns true if the tour visits each of `city_count` cities exactly once.
    pub fn is_complete(&self, city_count: usize) -> bool {
        if self.cities.len() != city_count {
            return false;
        }
        let mut seen = vec![false; city_count];
        for &city in &self.cities {
            if city >= city_count || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    pub fn into_cities(self) -> Vec<usize> {
        self.cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn square_matrix() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_tour_scores_round_trip() {
        let tour = Tour::new(vec![0, 1, 2, 3], &square_matrix());
        assert_eq!(tour.distance(), 4.0);
        assert_eq!(tour.len(), 4);
        assert!(tour.is_complete(4));
    }

    #[test]
    fn test_edges_include_closing_edge() {
        let tour = Tour::new(vec![0, 2, 1, 3], &square_matrix());
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(0, 2), (2, 1), (1, 3), (3, 0)]);
    }

    #[test]
    fn test_single_city_has_no_edges() {
        let tour = Tour::new(vec![2], &square_matrix());
        assert_eq!(tour.edges().count(), 0);
        assert_eq!(tour.distance(), 0.0);
    }

    #[test]
    fn test_is_complete_detects_truncation_and_repeats() {
        let matrix = square_matrix();
        assert!(!Tour::new(vec![0, 1, 2], &matrix).is_complete(4));
        assert!(!Tour::new(vec![0, 1, 1, 3], &matrix).is_complete(4));
        assert!(!Tour::new(vec![0, 1, 2, 3], &matrix).is_complete(5));
    }
}
