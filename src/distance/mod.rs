//! Distance matrices.
//!
//! Provides a dense, possibly asymmetric distance matrix for tour problems.

mod matrix;

pub use matrix::DistanceMatrix;
