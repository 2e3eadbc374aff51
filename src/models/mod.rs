//! Domain model types for tour problems.
//!
//! Provides the problem wrapper around a distance matrix, the mutable
//! circular tour with its cost bookkeeping, and the immutable solution
//! snapshot extracted from it.

mod point;
mod problem;
mod solution;
mod tour;

pub use point::Point;
pub use problem::Problem;
pub use solution::Solution;
pub use tour::{Node, Tour, TourIter};
