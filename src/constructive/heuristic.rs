//! Randomized construction driver.
//!
//! # Algorithm
//!
//! 1. Pick a uniformly random city as the depot and seed a one-node tour.
//! 2. While cities are pending: score them, select one, link it in.
//! 3. Recompute the tour's cost bookkeeping.
//!
//! # Complexity
//!
//! O(n²) for tail-arc variants, up to O(n³) for insertion variants
//! (each score walks the partial tour).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::strategy::{
    AnchorApplier, BestPosition, CandidateScorer, CandidateSelector, Greedy, InsertionApplier,
    Rcl, Scored, TailApplier, TailArc, UniformRandom,
};
use super::{Alpha, ConstructiveHeuristic};
use crate::error::Result;
use crate::models::{Problem, Solution, Tour};

/// Greedy: always append the city nearest to the tail.
pub type CheapestArc = Constructive<TailArc, Greedy, TailApplier>;
/// Tail insertion with RCL selection.
pub type SemiGreedyArc = Constructive<TailArc, Rcl, TailApplier>;
/// Always insert the (city, position) pair of minimal cost.
pub type CheapestInsertion = Constructive<BestPosition, Greedy, AnchorApplier>;
/// Uniformly random next city, inserted at its best position.
pub type RandomInsertion = Constructive<BestPosition, UniformRandom, AnchorApplier>;
/// Best-position insertion with RCL selection.
pub type SemiGreedyInsertion = Constructive<BestPosition, Rcl, AnchorApplier>;

/// A constructive heuristic assembled from a scorer, a selector, and an
/// applier, owning its own seeded random generator.
///
/// The generator advances across calls: repeated [`build`](Self::build)
/// calls on one instance give different tours, while a fresh instance with
/// the same seed replays the same sequence.
///
/// # Examples
///
/// ```
/// use u_grasp::constructive::{CheapestArc, SemiGreedyInsertion, Alpha};
/// use u_grasp::models::Problem;
///
/// let problem = Problem::from_rows(vec![
///     vec![0.0, 1.0, 2.0, 1.0],
///     vec![1.0, 0.0, 1.0, 2.0],
///     vec![2.0, 1.0, 0.0, 1.0],
///     vec![1.0, 2.0, 1.0, 0.0],
/// ]).unwrap();
///
/// let tour = CheapestArc::new(42).build(&problem);
/// assert!(tour.is_complete());
/// assert!((tour.cost() - 4.0).abs() < 1e-10);
///
/// let tour = SemiGreedyInsertion::new(Alpha::range(0.2, 1.0), 7).build(&problem);
/// assert_eq!(tour.solution().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Constructive<S, P, A> {
    scorer: S,
    selector: P,
    applier: A,
    rng: StdRng,
    name: &'static str,
}

impl<S, P, A> Constructive<S, P, A>
where
    S: CandidateScorer,
    P: CandidateSelector,
    A: InsertionApplier,
{
    /// Combines explicit strategy parts.
    pub fn from_parts(name: &'static str, scorer: S, selector: P, applier: A, seed: u64) -> Self {
        Self {
            scorer,
            selector,
            applier,
            rng: StdRng::seed_from_u64(seed),
            name,
        }
    }

    /// Reseeds the generator, restarting its random stream.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Builds a complete tour with up-to-date costs.
    pub fn build(&mut self, problem: &Problem) -> Tour {
        let n = problem.n();
        let depot = self.rng.random_range(0..n);
        let mut tour = Tour::new(n, depot);
        let mut pending: Vec<usize> = (0..n).filter(|&i| i != depot).collect();
        let mut scored: Vec<Scored> = Vec::with_capacity(pending.len());

        self.selector.begin(&mut self.rng);
        while !pending.is_empty() {
            let (pick, placement) = match self.selector.preselect(pending.len(), &mut self.rng) {
                Some(i) => (i, self.scorer.score(&tour, problem, pending[i])),
                None => {
                    scored.clear();
                    scored.extend(
                        pending
                            .iter()
                            .map(|&c| self.scorer.score(&tour, problem, c)),
                    );
                    let i = self.selector.select(&scored, &mut self.rng);
                    (i, scored[i])
                }
            };
            let city = pending.remove(pick);
            self.applier.apply(&mut tour, city, placement.anchor);
        }

        tour.calc_costs(problem.matrix());
        debug!(
            event = "construction_end",
            heuristic = self.name,
            depot,
            cost = tour.cost(),
        );
        tour
    }

    /// One-shot form: validates `rows` and returns the built tour's snapshot.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidInput`](crate::error::GraspError::InvalidInput)
    /// for a malformed matrix.
    pub fn solve(&mut self, rows: Vec<Vec<f64>>) -> Result<Solution> {
        let problem = Problem::from_rows(rows)?;
        Ok(Solution::from_tour(&self.build(&problem)))
    }
}

impl<S, P, A> ConstructiveHeuristic for Constructive<S, P, A>
where
    S: CandidateScorer,
    P: CandidateSelector,
    A: InsertionApplier,
{
    fn name(&self) -> &str {
        self.name
    }

    fn build(&mut self, problem: &Problem) -> Tour {
        Constructive::build(self, problem)
    }
}

impl CheapestArc {
    pub fn new(seed: u64) -> Self {
        Self::from_parts("cheapest_arc", TailArc, Greedy, TailApplier, seed)
    }
}

impl SemiGreedyArc {
    pub fn new(alpha: impl Into<Alpha>, seed: u64) -> Self {
        Self::from_parts(
            "semi_greedy_arc",
            TailArc,
            Rcl::new(alpha.into()),
            TailApplier,
            seed,
        )
    }
}

impl CheapestInsertion {
    pub fn new(seed: u64) -> Self {
        Self::from_parts("cheapest_insertion", BestPosition, Greedy, AnchorApplier, seed)
    }
}

impl RandomInsertion {
    pub fn new(seed: u64) -> Self {
        Self::from_parts(
            "random_insertion",
            BestPosition,
            UniformRandom,
            AnchorApplier,
            seed,
        )
    }
}

impl SemiGreedyInsertion {
    pub fn new(alpha: impl Into<Alpha>, seed: u64) -> Self {
        Self::from_parts(
            "semi_greedy_insertion",
            BestPosition,
            Rcl::new(alpha.into()),
            AnchorApplier,
            seed,
        )
    }
}
