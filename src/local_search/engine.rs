//! First-improvement neighborhood search over correlated pairs.
//!
//! # Algorithm
//!
//! 1. Recompute the tour's cost bookkeeping and build the
//!    [`CorrelatedNeighbors`] lists.
//! 2. Each pass shuffles the customers; for every customer `u` it shuffles
//!    `u`'s candidates and, for each candidate `v`, tries the moves of
//!    [`Move::CATALOG`] in order. The first move the acceptance rule takes
//!    is applied and the scan moves on to the next `v`. If none is taken and
//!    `v` directly follows the depot, the first three moves are retried with
//!    the depot as `v`.
//! 3. Stop after a pass without any accepted move, after `max_passes`
//!    passes, or once the acceptance rule is frozen.
//!
//! # Complexity
//!
//! Each pass evaluates O(n · k) pairs with O(1) deltas (k = candidates per
//! customer); every accepted move costs an O(n) cost refresh.
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::acceptance::{Acceptance, Annealing, Descent};
use super::moves::Move;
use super::neighbors::CorrelatedNeighbors;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{Problem, Solution, Tour};

/// Outcome of one [`LocalSearch::improve`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    /// Passes started over the customers.
    pub passes: usize,
    /// Accepted moves.
    pub moves: usize,
    /// Cost before the search.
    pub initial_cost: f64,
    /// Cost after the search.
    pub final_cost: f64,
}

/// Improves a complete tour in place.
pub trait Improver {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Runs at most `max_passes` passes over `tour`, which must link every
    /// city of `problem`.
    fn improve(&mut self, tour: &mut Tour, problem: &Problem, max_passes: usize) -> SearchStats;
}

/// Local search parameterized by its acceptance rule.
///
/// # Examples
///
/// ```
/// use u_grasp::local_search::VariableNeighborhoodDescent;
///
/// let rows = vec![
///     vec![0.0, 1.0, 1.5, 1.0],
///     vec![1.0, 0.0, 1.0, 1.5],
///     vec![1.5, 1.0, 0.0, 1.0],
///     vec![1.0, 1.5, 1.0, 0.0],
/// ];
/// let mut vnd = VariableNeighborhoodDescent::new(42);
/// let sol = vnd.solve(&[0, 2, 1, 3], rows, 100).unwrap();
/// assert!((sol.cost - 4.0).abs() < 1e-10);
/// assert!(vnd.n_moves() >= 1);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<A> {
    acceptance: A,
    rng: StdRng,
    n_moves: usize,
    history: Option<Vec<Vec<usize>>>,
}

/// Descent accepting only strict improvements.
pub type VariableNeighborhoodDescent = LocalSearch<Descent>;
/// Search under a Metropolis cooling schedule.
pub type SimulatedAnnealing = LocalSearch<Annealing>;

impl<A: Acceptance> LocalSearch<A> {
    pub fn with_acceptance(acceptance: A, seed: u64) -> Self {
        Self {
            acceptance,
            rng: StdRng::seed_from_u64(seed),
            n_moves: 0,
            history: None,
        }
    }

    /// Records the closed tour after every accepted move.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.history = enabled.then(Vec::new);
        self
    }

    /// Tours recorded by the last search, empty unless history is enabled.
    pub fn history(&self) -> &[Vec<usize>] {
        self.history.as_deref().unwrap_or(&[])
    }

    /// Accepted moves in the last search.
    pub fn n_moves(&self) -> usize {
        self.n_moves
    }

    pub fn acceptance(&self) -> &A {
        &self.acceptance
    }

    /// Improves a complete tour in place.
    ///
    /// # Panics
    ///
    /// Panics if `tour` does not link every city of `problem`.
    pub fn improve(&mut self, tour: &mut Tour, problem: &Problem, max_passes: usize) -> SearchStats {
        assert!(
            tour.is_complete() && tour.capacity() == problem.n(),
            "local search needs a complete tour over {} cities",
            problem.n()
        );
        let d = problem.matrix();
        tour.calc_costs(d);
        let initial_cost = tour.cost();

        self.n_moves = 0;
        self.acceptance.reset();
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }

        let mut neighbors = CorrelatedNeighbors::build(d, tour.depot());
        let mut customers: Vec<usize> = (0..problem.n()).filter(|&i| !tour.is_depot(i)).collect();

        let mut passes = 0;
        while passes < max_passes && !self.acceptance.frozen() {
            passes += 1;
            let before = self.n_moves;
            customers.shuffle(&mut self.rng);
            for &u in &customers {
                let candidates = neighbors.candidates_mut(u);
                candidates.shuffle(&mut self.rng);
                for &v in candidates.iter() {
                    self.try_pair(tour, d, u, v);
                }
            }
            if self.n_moves == before {
                break;
            }
        }

        let stats = SearchStats {
            passes,
            moves: self.n_moves,
            initial_cost,
            final_cost: tour.cost(),
        };
        debug!(
            event = "search_end",
            acceptance = self.acceptance.name(),
            passes,
            moves = stats.moves,
            initial_cost,
            final_cost = stats.final_cost,
        );
        stats
    }

    fn try_pair(&mut self, tour: &mut Tour, d: &DistanceMatrix, u: usize, v: usize) -> bool {
        if self.try_moves(&Move::CATALOG, tour, d, u, v) {
            return true;
        }
        let vp = tour.prev(v);
        tour.is_depot(vp) && self.try_moves(&Move::DEPOT_FALLBACK, tour, d, u, vp)
    }

    fn try_moves(
        &mut self,
        moves: &[Move],
        tour: &mut Tour,
        d: &DistanceMatrix,
        u: usize,
        v: usize,
    ) -> bool {
        for &mv in moves {
            let Some(delta) = mv.delta(tour, d, u, v) else {
                continue;
            };
            if !self.acceptance.accept(delta, &mut self.rng) {
                continue;
            }
            mv.apply(tour, u, v);
            tour.calc_costs(d);
            self.n_moves += 1;
            self.acceptance.on_accepted();
            trace!(event = "move", kind = mv.name(), u, v, delta, cost = tour.cost());
            if let Some(history) = self.history.as_mut() {
                history.push(tour.solution());
            }
            return true;
        }
        false
    }

    /// One-shot form: validates `rows` and `sequence`, improves the tour,
    /// and returns its snapshot.
    ///
    /// `sequence` may be open (`n` entries) or closed (depot repeated at the
    /// end); its first element becomes the depot.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidInput`](crate::error::GraspError::InvalidInput)
    /// for a malformed matrix or a sequence that is not a permutation.
    pub fn solve(
        &mut self,
        sequence: &[usize],
        rows: Vec<Vec<f64>>,
        max_passes: usize,
    ) -> Result<Solution> {
        let problem = Problem::from_rows(rows)?;
        let mut tour = Tour::from_sequence(sequence, problem.n())?;
        self.improve(&mut tour, &problem, max_passes);
        Ok(Solution::from_tour(&tour))
    }
}

impl<A: Acceptance> Improver for LocalSearch<A> {
    fn name(&self) -> &str {
        self.acceptance.name()
    }

    fn improve(&mut self, tour: &mut Tour, problem: &Problem, max_passes: usize) -> SearchStats {
        LocalSearch::improve(self, tour, problem, max_passes)
    }
}

impl VariableNeighborhoodDescent {
    pub fn new(seed: u64) -> Self {
        Self::with_acceptance(Descent, seed)
    }
}

impl SimulatedAnnealing {
    /// # Errors
    ///
    /// [`GraspError::Config`](crate::error::GraspError::Config) for an
    /// invalid cooling schedule.
    pub fn new(t_start: f64, t_final: f64, decay: f64, seed: u64) -> Result<Self> {
        Ok(Self::with_acceptance(
            Annealing::new(t_start, t_final, decay)?,
            seed,
        ))
    }
}
