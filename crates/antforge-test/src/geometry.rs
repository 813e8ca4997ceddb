//! Point sets with known optimal round trips.

use antforge_core::Point;
use std::f64::consts::TAU;

/// Corners of the unit square in perimeter order. Optimal tour: 4.0.
///
/// ```
/// use antforge_test::geometry::unit_square;
///
/// let points = unit_square();
/// assert_eq!(points[2].x, 1.0);
/// assert_eq!(points[2].y, 1.0);
/// ```
pub fn unit_square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ]
}

/// `(0, 0)` and `(5, 0)`. The only tour has length 10.0.
///
/// ```
/// use antforge_test::geometry::two_points;
///
/// assert_eq!(two_points()[0].distance_to(&two_points()[1]), 5.0);
/// ```
pub fn two_points() -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)]
}

/// `n` vertices of a regular polygon centred on the origin, in angular
/// order. The perimeter is optimal.
///
/// ```
/// use antforge_test::geometry::regular_polygon;
///
/// let hexagon = regular_polygon(6, 2.0);
/// assert_eq!(hexagon.len(), 6);
/// assert!((hexagon[0].x - 2.0).abs() < 1e-12);
/// ```
pub fn regular_polygon(n: usize, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|k| {
            let angle = TAU * k as f64 / n as f64;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Perimeter of [`regular_polygon`]`(n, radius)`.
pub fn regular_polygon_perimeter(n: usize, radius: f64) -> f64 {
    let side = 2.0 * radius * (std::f64::consts::PI / n as f64).sin();
    side * n as f64
}

/// Unit-spaced `rows x cols` lattice, row-major.
///
/// When `rows * cols` is even and both are at least 2, the optimal tour has
/// length `rows * cols`.
///
/// ```
/// use antforge_test::geometry::grid;
///
/// let points = grid(2, 3);
/// assert_eq!(points.len(), 6);
/// assert_eq!((points[4].x, points[4].y), (1.0, 1.0));
/// ```
pub fn grid(rows: usize, cols: usize) -> Vec<Point> {
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| Point::new(c as f64, r as f64)))
        .collect()
}
