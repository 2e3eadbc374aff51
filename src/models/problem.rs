//! Problem instance.

use crate::distance::DistanceMatrix;
use crate::error::{GraspError, Result};

/// A TSP instance: the node count and its n×n distance matrix.
///
/// Immutable once built. The matrix may be asymmetric.
///
/// # Examples
///
/// ```
/// use u_grasp::models::Problem;
///
/// let problem = Problem::from_rows(vec![
///     vec![0.0, 2.0, 9.0],
///     vec![1.0, 0.0, 6.0],
///     vec![15.0, 7.0, 0.0],
/// ]).unwrap();
/// assert_eq!(problem.n(), 3);
/// assert_eq!(problem.distance(2, 1), 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    distances: DistanceMatrix,
}

impl Problem {
    /// Wraps an existing distance matrix.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidInput`] if the matrix has no locations.
    pub fn new(distances: DistanceMatrix) -> Result<Self> {
        if distances.size() == 0 {
            return Err(GraspError::InvalidInput(
                "problem needs at least one node".into(),
            ));
        }
        Ok(Self { distances })
    }

    /// Validates explicit rows and wraps them.
    ///
    /// # Errors
    ///
    /// See [`DistanceMatrix::from_rows`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(DistanceMatrix::from_rows(&rows)?)
    }

    /// Number of nodes.
    pub fn n(&self) -> usize {
        self.distances.size()
    }

    /// Distance from `from` to `to`.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.distances
    }
}
