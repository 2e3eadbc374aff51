//! TSPLIB coordinate reader.
//!
//! Reads the `NODE_COORD_SECTION` of a TSPLIB file: header lines are
//! skipped, then every `id x y` row is read until `EOF` or the next
//! `*_SECTION` marker. Coordinates are returned in order of appearance;
//! node ids are not checked.
//!
//! ```text
//! NAME : square4
//! TYPE : TSP
//! DIMENSION : 4
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 0 0
//! 2 1 0
//! 3 1 1
//! 4 0 1
//! EOF
//! ```

use std::path::Path;

use crate::error::{GraspError, Result};
use crate::models::Point;

/// Parses node coordinates from TSPLIB text.
///
/// # Errors
///
/// [`GraspError::Parse`] for a coordinate row without exactly three fields
/// or with a non-numeric coordinate.
///
/// # Examples
///
/// ```
/// use u_grasp::tsplib::parse_node_coords;
///
/// let points = parse_node_coords("DIMENSION : 2\nNODE_COORD_SECTION\n1 0 0\n2 3 4\nEOF\n").unwrap();
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].distance_to(&points[1]), 5.0);
/// ```
pub fn parse_node_coords(text: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut in_section = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if !in_section {
            in_section = line == "NODE_COORD_SECTION";
            continue;
        }
        if line == "EOF" || line.ends_with("_SECTION") {
            break;
        }
        if line.is_empty() {
            continue;
        }
        points.push(parse_row(line, idx + 1)?);
    }

    Ok(points)
}

/// Reads node coordinates from a TSPLIB file.
///
/// # Errors
///
/// [`GraspError::Io`] if the file can't be read, otherwise as
/// [`parse_node_coords`].
pub fn read_node_coords(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let text = std::fs::read_to_string(path)?;
    parse_node_coords(&text)
}

fn parse_row(line: &str, line_no: usize) -> Result<Point> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [_, x, y] = fields.as_slice() else {
        return Err(GraspError::Parse {
            line: line_no,
            message: format!("expected `id x y`, got {} fields", fields.len()),
        });
    };
    let coord = |s: &str| {
        s.parse::<f64>().map_err(|e| GraspError::Parse {
            line: line_no,
            message: format!("bad coordinate {s:?}: {e}"),
        })
    };
    Ok(Point::new(coord(*x)?, coord(*y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "NAME : square4
COMMENT : unit square
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 1 0
3 1 1
4 0 1
EOF
";

    #[test]
    fn test_parse_square() {
        let points = parse_node_coords(SQUARE).expect("valid file");
        assert_eq!(
            points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_stops_at_next_section() {
        let text = "NODE_COORD_SECTION\n1 2.5 3e1\n\n2 -1 4\nDISPLAY_DATA_SECTION\n1 9 9\n";
        let points = parse_node_coords(text).expect("valid file");
        assert_eq!(points, vec![Point::new(2.5, 30.0), Point::new(-1.0, 4.0)]);
    }

    #[test]
    fn test_no_section_is_empty() {
        assert!(parse_node_coords("NAME : x\nTYPE : TSP\n")
            .expect("no rows")
            .is_empty());
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_node_coords("NODE_COORD_SECTION\n1 0 0\n2 1\n").unwrap_err();
        match err {
            GraspError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other}"),
        }

        let err = parse_node_coords("HEADER\nNODE_COORD_SECTION\n1 0 abc\n").unwrap_err();
        assert!(matches!(err, GraspError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_node_coords("/nonexistent/instance.tsp").unwrap_err();
        assert!(matches!(err, GraspError::Io(_)));
    }
}
