//! Correlated-neighbor candidate lists.

use std::collections::BTreeSet;

use crate::distance::DistanceMatrix;

/// Per-node candidate partners restricting which pairs local search
/// evaluates.
///
/// For every non-depot node `i`, the `ceil(n/2)` nearest nodes by raw row
/// distance are taken; each such `j` (other than the depot and `i` itself)
/// is added to `i`'s list and `i` is added to `j`'s list. The depot's list
/// stays empty.
///
/// # Examples
///
/// ```
/// use u_grasp::distance::DistanceMatrix;
/// use u_grasp::local_search::CorrelatedNeighbors;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0.0, 1.0, 4.0, 9.0],
///     vec![1.0, 0.0, 2.0, 8.0],
///     vec![4.0, 2.0, 0.0, 3.0],
///     vec![9.0, 8.0, 3.0, 0.0],
/// ]).unwrap();
/// let nb = CorrelatedNeighbors::build(&dm, 0);
/// assert_eq!(nb.candidates(1), &[2]);
/// assert!(nb.candidates(0).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CorrelatedNeighbors {
    lists: Vec<Vec<usize>>,
}

impl CorrelatedNeighbors {
    /// Builds the symmetrized candidate lists for a tour rooted at `depot`.
    pub fn build(distances: &DistanceMatrix, depot: usize) -> Self {
        let n = distances.size();
        let k = n.div_ceil(2);
        let mut sets: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for i in (0..n).filter(|&i| i != depot) {
            for j in distances.nearest(i, k) {
                if j != depot && j != i {
                    sets[i].insert(j);
                    sets[j].insert(i);
                }
            }
        }
        Self {
            lists: sets.into_iter().map(|s| s.into_iter().collect()).collect(),
        }
    }

    /// Candidate partners of `node`, in their current (possibly shuffled)
    /// order.
    pub fn candidates(&self, node: usize) -> &[usize] {
        &self.lists[node]
    }

    pub(crate) fn candidates_mut(&mut self, node: usize) -> &mut Vec<usize> {
        &mut self.lists[node]
    }

    /// Total number of directed candidate pairs.
    pub fn pair_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }
}
