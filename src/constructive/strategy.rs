//! Composable construction strategies.
//!
//! A construction step scores every pending city, lets a selector pick one,
//! and hands it to an applier that links it into the tour:
//!
//! - [`CandidateScorer`] — how much placing a city would cost, and where
//! - [`CandidateSelector`] — which scored city to place next
//! - [`InsertionApplier`] — how the chosen city is linked in
//!
//! [`Constructive`](super::Constructive) combines one of each.

use rand::rngs::StdRng;
use rand::Rng;

use super::Alpha;
use crate::models::{Problem, Tour};

/// Score of placing one pending city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    /// Cost increase of the placement (lower is better).
    pub score: f64,
    /// Tour node the city would follow.
    pub anchor: usize,
}

/// Scores the placement of a pending city in a partial tour.
pub trait CandidateScorer {
    fn score(&self, tour: &Tour, problem: &Problem, city: usize) -> Scored;
}

/// Picks the next city to place.
pub trait CandidateSelector {
    /// Called once at the start of every construction.
    fn begin(&mut self, _rng: &mut StdRng) {}

    /// Chooses a pending index before scoring, for selectors that ignore
    /// scores. `None` means every candidate is scored and passed to
    /// [`select`](CandidateSelector::select).
    fn preselect(&mut self, _pending: usize, _rng: &mut StdRng) -> Option<usize> {
        None
    }

    /// Chooses an index into `scored` (never empty).
    fn select(&mut self, scored: &[Scored], rng: &mut StdRng) -> usize;
}

/// Links a chosen city into the tour.
pub trait InsertionApplier {
    fn apply(&self, tour: &mut Tour, city: usize, anchor: usize);
}

// ---- Scorers ----

/// Scores a city by the arc from the current tour tail.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailArc;

impl CandidateScorer for TailArc {
    fn score(&self, tour: &Tour, problem: &Problem, city: usize) -> Scored {
        let tail = tour.tail();
        Scored {
            score: problem.distance(tail, city),
            anchor: tail,
        }
    }
}

/// Scores a city by its cheapest insertion between two linked nodes:
///
/// ```text
/// cost(u, c) = d(u, c) + d(c, u.next) − d(u, u.next)
/// ```
///
/// Ties keep the first position in tour order from the depot. O(n).
#[derive(Debug, Clone, Copy, Default)]
pub struct BestPosition;

impl CandidateScorer for BestPosition {
    fn score(&self, tour: &Tour, problem: &Problem, city: usize) -> Scored {
        let mut best = Scored {
            score: f64::INFINITY,
            anchor: tour.depot(),
        };
        for u in tour.iter() {
            let next = tour.next(u);
            let cost = problem.distance(u, city) + problem.distance(city, next)
                - problem.distance(u, next);
            if cost < best.score {
                best = Scored {
                    score: cost,
                    anchor: u,
                };
            }
        }
        best
    }
}

// ---- Selectors ----

/// Always picks the lowest score; ties go to the earliest pending city.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl CandidateSelector for Greedy {
    fn select(&mut self, scored: &[Scored], _rng: &mut StdRng) -> usize {
        argmin(scored)
    }
}

/// Restricted candidate list: uniform pick among scores within
/// `worst − alpha·(worst − best)`. Alpha is drawn once per construction.
#[derive(Debug, Clone, Copy)]
pub struct Rcl {
    alpha: Alpha,
    current: f64,
}

impl Rcl {
    pub fn new(alpha: Alpha) -> Self {
        Self {
            alpha,
            current: 0.5,
        }
    }

    /// Alpha drawn for the construction in progress.
    pub fn current_alpha(&self) -> f64 {
        self.current
    }
}

impl CandidateSelector for Rcl {
    fn begin(&mut self, rng: &mut StdRng) {
        self.current = self.alpha.draw(rng);
    }

    fn select(&mut self, scored: &[Scored], rng: &mut StdRng) -> usize {
        let (best, worst) = scored
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.score), hi.max(s.score))
            });
        let threshold = worst - self.current * (worst - best);
        let rcl: Vec<usize> = (0..scored.len())
            .filter(|&i| scored[i].score <= threshold)
            .collect();
        if rcl.is_empty() {
            return argmin(scored);
        }
        rcl[rng.random_range(0..rcl.len())]
    }
}

/// Picks uniformly at random, ignoring scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl CandidateSelector for UniformRandom {
    fn preselect(&mut self, pending: usize, rng: &mut StdRng) -> Option<usize> {
        Some(rng.random_range(0..pending))
    }

    fn select(&mut self, scored: &[Scored], rng: &mut StdRng) -> usize {
        rng.random_range(0..scored.len())
    }
}

fn argmin(scored: &[Scored]) -> usize {
    let mut best = 0;
    for (i, s) in scored.iter().enumerate().skip(1) {
        if s.score < scored[best].score {
            best = i;
        }
    }
    best
}

// ---- Appliers ----

/// Appends at the tail, immediately before the depot.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailApplier;

impl InsertionApplier for TailApplier {
    fn apply(&self, tour: &mut Tour, city: usize, _anchor: usize) {
        tour.insert(city);
    }
}

/// Links the city right after the scored anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorApplier;

impl InsertionApplier for AnchorApplier {
    fn apply(&self, tour: &mut Tour, city: usize, anchor: usize) {
        tour.insert_after(anchor, city);
    }
}
