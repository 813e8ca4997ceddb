//! Loading point sets from delimited text files.
//!
//! The format is deliberately loose: the first non-blank line is a header
//! and is skipped, blank lines and lines with fewer than two comma-separated
//! columns are ignored, and only the first two columns are read, as `x` and
//! `y`. Extra columns such as labels are allowed.
//!
//! ```
//! use antforge::instance::parse_points;
//!
//! let points = parse_points("x,y\n0,0\n3,4\n").unwrap();
//! assert_eq!(points.len(), 2);
//! assert_eq!(points[0].distance_to(&points[1]), 5.0);
//! ```

use std::path::Path;

use antforge_core::{AntForgeError, Point};
use thiserror::Error;

/// Point file error
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("at least 2 points are required, found {0}")]
    TooFewPoints(usize),
}

impl From<InstanceError> for AntForgeError {
    fn from(err: InstanceError) -> Self {
        AntForgeError::InvalidInput(err.to_string())
    }
}

/// Reads and parses the point file at `path`.
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point>, InstanceError> {
    let content = std::fs::read_to_string(path)?;
    parse_points(&content)
}

/// Parses point file contents.
///
/// # Errors
///
/// [`InstanceError::Parse`] with the 1-based line number of the first
/// malformed coordinate, or [`InstanceError::TooFewPoints`].
pub fn parse_points(content: &str) -> Result<Vec<Point>, InstanceError> {
    let mut points = Vec::new();
    let mut header_seen = false;

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }

        let mut columns = line.split(',');
        let (Some(x), Some(y)) = (columns.next(), columns.next()) else {
            continue;
        };
        let line_number = index + 1;
        points.push(Point::new(
            parse_coordinate(x, "x", line_number)?,
            parse_coordinate(y, "y", line_number)?,
        ));
    }

    if points.len() < 2 {
        return Err(InstanceError::TooFewPoints(points.len()));
    }
    Ok(points)
}

fn parse_coordinate(raw: &str, axis: &str, line: usize) -> Result<f64, InstanceError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| InstanceError::Parse {
            line,
            message: format!("invalid {} coordinate {:?}: {}", axis, raw.trim(), e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use antforge_test::csv::{to_csv, UNIT_SQUARE_CSV};
    use antforge_test::geometry::{grid, unit_square};
    use std::io::Write;

    #[test]
    fn test_parse_skips_header_blank_and_short_lines() {
        let points = parse_points(UNIT_SQUARE_CSV).unwrap();
        assert_eq!(points, unit_square());
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_points("x,y\n0,0\n\n1,abc\n").unwrap_err();
        match err {
            InstanceError::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("abc"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_is_first_non_blank_line() {
        let points = parse_points("\n\nx,y\n1,2\n3,4\n").unwrap();
        assert_eq!(points[0], Point::new(1.0, 2.0));
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            parse_points("x,y\n1,1\n"),
            Err(InstanceError::TooFewPoints(1))
        ));
        assert!(matches!(parse_points(""), Err(InstanceError::TooFewPoints(0))));
    }

    #[test]
    fn test_load_points_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(to_csv(&grid(2, 2)).as_bytes()).unwrap();

        let points = load_points(file.path()).unwrap();
        assert_eq!(points, grid(2, 2));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_points("/nonexistent/points.csv").unwrap_err();
        assert!(matches!(err, InstanceError::Io(_)));
        assert!(matches!(
            AntForgeError::from(err),
            AntForgeError::InvalidInput(_)
        ));
    }
}
