//! Planar coordinates.

use serde::{Deserialize, Serialize};

/// A city location, as read from a TSPLIB `NODE_COORD_SECTION`.
///
/// ```
/// use u_grasp::models::Point;
///
/// let depot = Point::new(1.0, 1.0);
/// assert!((depot.distance_to(&Point::new(4.0, 5.0)) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_in_both_directions() {
        let a = Point::new(-2.0, 7.0);
        let b = Point::new(10.0, 2.0);
        assert!((a.distance_to(&b) - 13.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(3.5, -1.25);
        assert_eq!(p.distance_to(&p), 0.0);
    }
}
