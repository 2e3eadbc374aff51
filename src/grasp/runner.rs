//! GRASP execution engine.
//!
//! # Algorithm
//!
//! 1. Stop if the time budget is spent or `max_iter` iterations are done.
//! 2. Build a fresh tour with the constructive heuristic.
//! 3. Improve it with local search, bounded by `max_moves` passes.
//! 4. Record its cost; if strictly better than the incumbent, snapshot it
//!    and stop once the incumbent meets `target`.
//!
//! The budget is only checked between iterations, so a run may overshoot
//! `time_limit` by up to one iteration.
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy randomized adaptive search
//! procedures", *Journal of Global Optimization* 6, 109-133.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::config::GraspConfig;
use crate::constructive::ConstructiveHeuristic;
use crate::error::Result;
use crate::local_search::Improver;
use crate::models::{Problem, Solution};

/// Result of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    /// Best solution found, `None` if no iteration completed.
    pub best: Option<Solution>,
    /// Post-improvement cost of every completed iteration.
    pub costs: Vec<f64>,
    /// Completed iterations.
    pub iterations: usize,
    /// Iteration (0-based) that produced `best`.
    pub best_iteration: Option<usize>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl GraspResult {
    /// Cost of the best solution, if any.
    pub fn best_cost(&self) -> Option<f64> {
        self.best.as_ref().map(|s| s.cost)
    }
}

/// Greedy randomized adaptive search: repeated construction followed by
/// local search, keeping the best tour.
///
/// # Examples
///
/// ```
/// use u_grasp::constructive::ConstructiveKind;
/// use u_grasp::grasp::{Grasp, GraspConfig};
///
/// let rows = vec![
///     vec![0.0, 1.0, 1.5, 1.0],
///     vec![1.0, 0.0, 1.0, 1.5],
///     vec![1.5, 1.0, 0.0, 1.0],
///     vec![1.0, 1.5, 1.0, 0.0],
/// ];
/// let config = GraspConfig::default()
///     .with_constructive(ConstructiveKind::RandomInsertion)
///     .with_max_iter(10)
///     .with_seed(1);
/// let mut grasp = Grasp::new(config).unwrap();
/// let result = grasp.solve_matrix(rows).unwrap();
/// let best = result.best.unwrap();
/// assert!((best.cost - 4.0).abs() < 1e-10);
/// assert_eq!(result.iterations, 10);
/// ```
pub struct Grasp {
    constructive: Box<dyn ConstructiveHeuristic>,
    local_search: Box<dyn Improver>,
    config: GraspConfig,
}

impl Grasp {
    /// Builds the configured heuristic pair, both seeded from
    /// [`GraspConfig::effective_seed`].
    ///
    /// # Errors
    ///
    /// [`GraspError::Config`](crate::error::GraspError::Config) if the
    /// configuration fails validation.
    pub fn new(config: GraspConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.effective_seed();
        let constructive = config.constructive.build(config.alpha, seed);
        let local_search = config.local_search.build(seed)?;
        Ok(Self {
            constructive,
            local_search,
            config,
        })
    }

    /// Uses caller-supplied strategies. Only the budget fields of `config`
    /// are read.
    pub fn with_parts(
        constructive: Box<dyn ConstructiveHeuristic>,
        local_search: Box<dyn Improver>,
        config: GraspConfig,
    ) -> Self {
        Self {
            constructive,
            local_search,
            config,
        }
    }

    /// Budgets and seed this driver runs with.
    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    /// Runs GRASP until a budget is exhausted or the target is met.
    pub fn solve(&mut self, problem: &Problem) -> GraspResult {
        let start = Instant::now();
        let GraspConfig {
            time_limit,
            max_iter,
            max_moves,
            target,
            ..
        } = self.config;

        info!(
            event = "solve_start",
            n = problem.n(),
            symmetric = problem.matrix().is_symmetric(1e-9),
            constructive = self.constructive.name(),
            local_search = self.local_search.name(),
            max_iter,
            max_moves,
        );

        let mut best: Option<Solution> = None;
        let mut best_iteration = None;
        let mut costs = Vec::new();

        for iteration in 0..max_iter {
            if time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break;
            }

            let mut tour = self.constructive.build(problem);
            let stats = self.local_search.improve(&mut tour, problem, max_moves);
            let cost = tour.cost();
            costs.push(cost);
            debug!(
                event = "iteration",
                iteration,
                constructed = stats.initial_cost,
                cost,
                passes = stats.passes,
                moves = stats.moves,
            );

            if best.as_ref().map_or(true, |b| cost < b.cost) {
                best = Some(Solution::from_tour(&tour));
                best_iteration = Some(iteration);
                info!(event = "new_best", iteration, cost);
                if target.is_some_and(|t| cost <= t) {
                    break;
                }
            }
        }

        let elapsed = start.elapsed();
        let result = GraspResult {
            best,
            iterations: costs.len(),
            costs,
            best_iteration,
            elapsed,
        };
        info!(
            event = "solve_end",
            iterations = result.iterations,
            best_cost = result.best_cost(),
            elapsed_ms = elapsed.as_millis() as u64,
        );
        result
    }

    /// Validates `rows` and runs [`solve`](Self::solve).
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidInput`](crate::error::GraspError::InvalidInput)
    /// for a malformed matrix.
    pub fn solve_matrix(&mut self, rows: Vec<Vec<f64>>) -> Result<GraspResult> {
        let problem = Problem::from_rows(rows)?;
        Ok(self.solve(&problem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{Alpha, CheapestArc, ConstructiveKind, SemiGreedyInsertion};
    use crate::distance::DistanceMatrix;
    use crate::error::GraspError;
    use crate::local_search::{LocalSearchKind, VariableNeighborhoodDescent};
    use crate::models::Point;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_problem(n: usize, seed: u64) -> Problem {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        Problem::new(DistanceMatrix::from_points(&points)).expect("non-empty")
    }

    fn min_cost(costs: &[f64]) -> f64 {
        costs.iter().copied().fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_incumbent_is_min_of_history() {
        let problem = random_problem(30, 1);
        let config = GraspConfig::default()
            .with_constructive(ConstructiveKind::SemiGreedyInsertion)
            .with_max_iter(15)
            .with_seed(4);
        let result = Grasp::new(config).expect("valid").solve(&problem);

        assert_eq!(result.iterations, 15);
        assert_eq!(result.costs.len(), 15);
        let best = result.best.as_ref().expect("ran iterations");
        assert_eq!(best.cost, min_cost(&result.costs));
        let iteration = result.best_iteration.expect("ran iterations");
        assert_eq!(result.costs[iteration], best.cost);
        // Strictly-better rule keeps the first occurrence of the minimum
        assert!(result.costs[..iteration].iter().all(|&c| c > best.cost));
        assert!((best.closed_cost(problem.matrix()) - best.cost).abs() < 1e-9);
    }

    #[test]
    fn test_zero_time_limit_runs_nothing() {
        let problem = random_problem(10, 2);
        let config = GraspConfig::default().with_time_limit(Duration::ZERO);
        let result = Grasp::new(config).expect("valid").solve(&problem);
        assert!(result.best.is_none());
        assert_eq!(result.iterations, 0);
        assert!(result.costs.is_empty());
    }

    #[test]
    fn test_zero_max_iter_runs_nothing() {
        let problem = random_problem(10, 2);
        let result = Grasp::new(GraspConfig::default().with_max_iter(0))
            .expect("valid")
            .solve(&problem);
        assert!(result.best.is_none());
        assert_eq!(result.best_cost(), None);
    }

    #[test]
    fn test_target_stops_early() {
        let problem = random_problem(20, 3);
        let config = GraspConfig::default()
            .with_max_iter(1000)
            .with_target(f64::INFINITY);
        let result = Grasp::new(config).expect("valid").solve(&problem);
        assert_eq!(result.iterations, 1);
        assert!(result.best.is_some());
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = random_problem(25, 5);
        let config = GraspConfig::default()
            .with_constructive(ConstructiveKind::SemiGreedyArc)
            .with_alpha(Alpha::range(0.3, 0.9))
            .with_local_search(LocalSearchKind::annealing())
            .with_max_iter(8)
            .with_seed(17);
        let a = Grasp::new(config.clone()).expect("valid").solve(&problem);
        let b = Grasp::new(config).expect("valid").solve(&problem);
        assert_eq!(a.costs, b.costs);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_with_parts() {
        let problem = random_problem(15, 6);
        let mut grasp = Grasp::with_parts(
            Box::new(SemiGreedyInsertion::new(0.7, 2)),
            Box::new(VariableNeighborhoodDescent::new(2)),
            GraspConfig::default().with_max_iter(5),
        );
        assert_eq!(grasp.config().max_iter, 5);
        let result = grasp.solve(&problem);
        assert_eq!(result.iterations, 5);
        let best = result.best.expect("ran iterations");
        assert_eq!(best.len(), 15);
    }

    #[test]
    fn test_improves_on_construction() {
        let problem = random_problem(40, 7);
        let constructed = CheapestArc::new(42).build(&problem).cost();
        let result = Grasp::new(GraspConfig::default().with_max_iter(1))
            .expect("valid")
            .solve(&problem);
        assert!(result.best_cost().expect("one iteration") <= constructed);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = Grasp::new(GraspConfig::default().with_alpha(Alpha::range(0.9, 0.1)));
        assert!(matches!(err, Err(GraspError::Config(_))));
    }

    #[test]
    fn test_solve_matrix_validates() {
        let mut grasp = Grasp::new(GraspConfig::default()).expect("valid");
        let err = grasp.solve_matrix(vec![vec![0.0, 1.0], vec![1.0]]);
        assert!(matches!(err, Err(GraspError::InvalidInput(_))));
    }

    #[test]
    fn test_single_node_problem() {
        let mut grasp = Grasp::new(GraspConfig::default().with_max_iter(3)).expect("valid");
        let result = grasp.solve_matrix(vec![vec![0.0]]).expect("1x1");
        let best = result.best.expect("ran iterations");
        assert_eq!(best.tour, vec![0, 0]);
        assert_eq!(best.cost, 0.0);
        // Later iterations tie and never replace the incumbent
        assert_eq!(result.best_iteration, Some(0));
    }
}
