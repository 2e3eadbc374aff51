//! Immutable tour snapshot.

use serde::{Deserialize, Serialize};

use super::Tour;
use crate::distance::DistanceMatrix;

/// A complete tour captured at a point in time.
///
/// `tour` is the closed cycle: it starts and ends at the depot, so its
/// length is `n + 1`. Decoupled from [`Tour`] so later mutation of the
/// working tour never changes a recorded solution.
///
/// # Examples
///
/// ```
/// use u_grasp::models::{Problem, Solution, Tour};
///
/// let problem = Problem::from_rows(vec![
///     vec![0.0, 3.0],
///     vec![3.0, 0.0],
/// ]).unwrap();
/// let mut tour = Tour::from_sequence(&[1, 0], 2).unwrap();
/// tour.calc_costs(problem.matrix());
///
/// let sol = Solution::from_tour(&tour);
/// assert_eq!(sol.tour, vec![1, 0, 1]);
/// assert!((sol.cost - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Node indices in visiting order, depot repeated at the end.
    pub tour: Vec<usize>,
    /// Closed-cycle length.
    pub cost: f64,
}

impl Solution {
    /// Snapshots a tour whose costs are up to date.
    pub fn from_tour(tour: &Tour) -> Self {
        Self {
            tour: tour.solution(),
            cost: tour.cost(),
        }
    }

    /// Number of distinct nodes visited.
    pub fn len(&self) -> usize {
        self.tour.len().saturating_sub(1)
    }

    /// Returns `true` if the snapshot holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    /// Depot index (first and last element).
    pub fn depot(&self) -> Option<usize> {
        self.tour.first().copied()
    }

    /// Recomputes the closed-cycle length directly from the matrix.
    pub fn closed_cost(&self, distances: &DistanceMatrix) -> f64 {
        self.tour
            .windows(2)
            .map(|w| distances.get(w[0], w[1]))
            .sum()
    }
}
