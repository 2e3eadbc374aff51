//! Randomized constructive heuristics for building initial tours.
//!
//! - [`CheapestArc`] — Greedy tail insertion of the nearest city, O(n²)
//! - [`SemiGreedyArc`] — Tail insertion with RCL selection, O(n²)
//! - [`CheapestInsertion`] — Minimal-cost (city, position) insertion, O(n³)
//! - [`RandomInsertion`] — Random city at its best position, O(n²)
//! - [`SemiGreedyInsertion`] — Best-position insertion with RCL selection, O(n³)
//!
//! Every variant picks a uniformly random depot and is assembled from the
//! strategies in [`strategy`].

mod alpha;
mod heuristic;
pub mod strategy;

use serde::{Deserialize, Serialize};

use crate::models::{Problem, Tour};

pub use alpha::Alpha;
pub use heuristic::{
    CheapestArc, CheapestInsertion, Constructive, RandomInsertion, SemiGreedyArc,
    SemiGreedyInsertion,
};

/// A tour builder usable behind a trait object.
pub trait ConstructiveHeuristic {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Builds a complete tour with up-to-date costs.
    fn build(&mut self, problem: &Problem) -> Tour;
}

/// Selects one of the built-in constructive heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructiveKind {
    #[default]
    CheapestArc,
    SemiGreedyArc,
    CheapestInsertion,
    RandomInsertion,
    SemiGreedyInsertion,
}

impl ConstructiveKind {
    /// Instantiates the heuristic; `alpha` only affects the semi-greedy
    /// variants.
    pub fn build(self, alpha: Alpha, seed: u64) -> Box<dyn ConstructiveHeuristic> {
        match self {
            Self::CheapestArc => Box::new(CheapestArc::new(seed)),
            Self::SemiGreedyArc => Box::new(SemiGreedyArc::new(alpha, seed)),
            Self::CheapestInsertion => Box::new(CheapestInsertion::new(seed)),
            Self::RandomInsertion => Box::new(RandomInsertion::new(seed)),
            Self::SemiGreedyInsertion => Box::new(SemiGreedyInsertion::new(alpha, seed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let kinds = [
            (ConstructiveKind::CheapestArc, "cheapest_arc"),
            (ConstructiveKind::SemiGreedyArc, "semi_greedy_arc"),
            (ConstructiveKind::CheapestInsertion, "cheapest_insertion"),
            (ConstructiveKind::RandomInsertion, "random_insertion"),
            (ConstructiveKind::SemiGreedyInsertion, "semi_greedy_insertion"),
        ];
        for (kind, name) in kinds {
            assert_eq!(kind.build(Alpha::default(), 0).name(), name);
        }
    }

    #[test]
    fn test_kind_default() {
        assert_eq!(ConstructiveKind::default(), ConstructiveKind::CheapestArc);
    }
}
