//! Local search improving complete tours.
//!
//! - [`VariableNeighborhoodDescent`] — First-improvement descent over seven moves
//! - [`SimulatedAnnealing`] — Same neighborhood under Metropolis acceptance
//!
//! Both evaluate only pairs drawn from [`CorrelatedNeighbors`] and share the
//! engine in [`LocalSearch`]; they differ only in their [`Acceptance`] rule.

mod acceptance;
mod engine;
mod moves;
mod neighbors;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use acceptance::{Acceptance, Annealing, Descent, IMPROVEMENT_EPS};
pub use engine::{
    Improver, LocalSearch, SearchStats, SimulatedAnnealing, VariableNeighborhoodDescent,
};
pub use moves::Move;
pub use neighbors::CorrelatedNeighbors;

/// Selects the acceptance rule used after each construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocalSearchKind {
    #[default]
    Descent,
    Annealing {
        #[serde(default = "default_t_start")]
        t_start: f64,
        #[serde(default = "default_t_final")]
        t_final: f64,
        #[serde(default = "default_decay")]
        decay: f64,
    },
}

fn default_t_start() -> f64 {
    Annealing::DEFAULT_T_START
}

fn default_t_final() -> f64 {
    Annealing::DEFAULT_T_FINAL
}

fn default_decay() -> f64 {
    Annealing::DEFAULT_DECAY
}

impl LocalSearchKind {
    /// Annealing with the default schedule.
    pub fn annealing() -> Self {
        Self::Annealing {
            t_start: Annealing::DEFAULT_T_START,
            t_final: Annealing::DEFAULT_T_FINAL,
            decay: Annealing::DEFAULT_DECAY,
        }
    }

    /// # Errors
    ///
    /// [`GraspError::Config`](crate::error::GraspError::Config) for an
    /// invalid cooling schedule.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Descent => Ok(()),
            Self::Annealing {
                t_start,
                t_final,
                decay,
            } => acceptance::validate_schedule(t_start, t_final, decay),
        }
    }

    /// Instantiates the search.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn build(self, seed: u64) -> Result<Box<dyn Improver>> {
        let improver: Box<dyn Improver> = match self {
            Self::Descent => Box::new(VariableNeighborhoodDescent::new(seed)),
            Self::Annealing {
                t_start,
                t_final,
                decay,
            } => Box::new(SimulatedAnnealing::new(t_start, t_final, decay, seed)?),
        };
        Ok(improver)
    }
}
