//! # u-grasp
//!
//! GRASP metaheuristic for the Traveling Salesman Problem over a dense,
//! possibly asymmetric distance matrix.
//!
//! ## Modules
//!
//! - [`models`] — Tour (linked nodes with prefix costs), Problem, Solution
//! - [`distance`] — Dense distance matrix
//! - [`constructive`] — Randomized constructive heuristics with RCL selection
//! - [`local_search`] — Seven-move neighborhood descent and simulated annealing
//! - [`grasp`] — Construct-and-improve driver with time, iteration, and target budgets
//! - [`tsplib`] — TSPLIB coordinate reader
//! - [`error`] — Error type
//!
//! ## Example
//!
//! ```
//! use u_grasp::constructive::ConstructiveKind;
//! use u_grasp::distance::DistanceMatrix;
//! use u_grasp::grasp::{Grasp, GraspConfig};
//! use u_grasp::models::{Point, Problem};
//!
//! let points: Vec<Point> = (0..12)
//!     .map(|i| {
//!         let a = i as f64 * std::f64::consts::TAU / 12.0;
//!         Point::new(a.cos(), a.sin())
//!     })
//!     .collect();
//! let problem = Problem::new(DistanceMatrix::from_points(&points)).unwrap();
//!
//! let config = GraspConfig::default()
//!     .with_constructive(ConstructiveKind::SemiGreedyInsertion)
//!     .with_max_iter(20)
//!     .with_seed(3);
//! let result = Grasp::new(config).unwrap().solve(&problem);
//! let best = result.best.unwrap();
//! assert_eq!(best.tour.len(), 13);
//! assert_eq!(best.tour.first(), best.tour.last());
//! ```
//!
//! The library emits `tracing` events but installs no subscriber.

pub mod constructive;
pub mod distance;
pub mod error;
pub mod grasp;
pub mod local_search;
pub mod models;
pub mod tsplib;

pub use error::{GraspError, Result};
