//! Euclidean cost model over a fixed point set.

use crate::error::{AntForgeError, Result};

/// A city location in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Symmetric matrix of pairwise Euclidean distances.
///
/// Built once from the point set and immutable afterwards, so it can be
/// shared read-only between concurrently constructing ants.
///
/// # Example
///
/// ```
/// use antforge_core::{DistanceMatrix, Point};
///
/// let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
/// let matrix = DistanceMatrix::from_points(&points).unwrap();
///
/// assert_eq!(matrix.city_count(), 2);
/// assert_eq!(matrix.get(0, 1), 5.0);
/// assert_eq!(matrix.get(1, 0), 5.0);
/// assert_eq!(matrix.get(1, 1), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    // Row-major, n * n entries.
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes all pairwise distances.
    ///
    /// # Errors
    ///
    /// Returns [`AntForgeError::InvalidInput`] for fewer than two points or
    /// any non-finite coordinate.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(AntForgeError::invalid(format!(
                "at least 2 points are required, got {}",
                n
            )));
        }
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(AntForgeError::invalid(format!(
                "point {} has a non-finite coordinate",
                index
            )));
        }

        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        Ok(Self { n, distances })
    }

    /// Number of cities covered by the matrix.
    pub fn city_count(&self) -> usize {
        self.n
    }

    /// Distance between cities `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.n + j]
    }

    /// Distances from city `i` to every city, in index order.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.distances[i * self.n..(i + 1) * self.n]
    }

    /// Round-trip length of `route`, including the closing edge back to the
    /// first city.
    ///
    /// A route of one city (or none) has length zero.
    pub fn round_trip_length(&self, route: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return 0.0;
        };
        let open: f64 = route.windows(2).map(|w| self.get(w[0], w[1])).sum();
        open + self.get(last, first)
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
