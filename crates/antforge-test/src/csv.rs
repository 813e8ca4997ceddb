//! Point files in the delimited format the command-line loader reads.

use antforge_core::Point;

/// Unit square with a header row, a blank line and a short row that the
/// loader skips.
pub const UNIT_SQUARE_CSV: &str = "\
x,y,label
0,0,a

1,0,b
ignored
1,1,c
 0 , 1 ,d
";

/// Renders `points` with an `x,y` header, one point per line.
///
/// ```
/// use antforge_core::Point;
/// use antforge_test::csv::to_csv;
///
/// let text = to_csv(&[Point::new(1.5, 2.0)]);
/// assert_eq!(text, "x,y\n1.5,2\n");
/// ```
pub fn to_csv(points: &[Point]) -> String {
    let mut out = String::from("x,y\n");
    for point in points {
        out.push_str(&format!("{},{}\n", point.x, point.y));
    }
    out
}
