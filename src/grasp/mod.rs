//! Greedy randomized adaptive search procedure.
//!
//! [`Grasp`] alternates a randomized [constructive](crate::constructive)
//! heuristic with [local search](crate::local_search) and keeps the best
//! tour, under the budgets of a [`GraspConfig`].

mod config;
mod runner;

pub use config::{GraspConfig, DEFAULT_SEED};
pub use runner::{Grasp, GraspResult};
