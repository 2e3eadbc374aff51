//! Move acceptance rules.

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{GraspError, Result};

/// Minimum cost decrease that counts as an improvement.
pub const IMPROVEMENT_EPS: f64 = 1e-4;

/// Decides whether an evaluated move is applied.
pub trait Acceptance {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Restores the initial state; called at the start of every search.
    fn reset(&mut self) {}

    /// Returns `true` if a move changing the cost by `delta` is taken.
    fn accept(&mut self, delta: f64, rng: &mut StdRng) -> bool;

    /// Called after an accepted move has been applied.
    fn on_accepted(&mut self) {}

    /// Returns `true` once the search should stop regardless of progress.
    /// Checked between passes.
    fn frozen(&self) -> bool {
        false
    }
}

/// First-improvement descent: accepts only strict improvements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descent;

impl Acceptance for Descent {
    fn name(&self) -> &str {
        "descent"
    }

    fn accept(&mut self, delta: f64, _rng: &mut StdRng) -> bool {
        delta < -IMPROVEMENT_EPS
    }
}

/// Metropolis acceptance with a geometric cooling schedule.
///
/// A move is taken if it improves by more than [`IMPROVEMENT_EPS`], or with
/// probability `exp(−(delta + ε) / T)` otherwise. `T` starts at `t_start`,
/// is multiplied by `decay` after every accepted move, and the search
/// freezes once it falls below `t_final`.
#[derive(Debug, Clone, Copy)]
pub struct Annealing {
    t_start: f64,
    t_final: f64,
    decay: f64,
    temperature: f64,
}

impl Annealing {
    pub const DEFAULT_T_START: f64 = 10.0;
    pub const DEFAULT_T_FINAL: f64 = 1e-3;
    pub const DEFAULT_DECAY: f64 = 0.99;

    /// # Errors
    ///
    /// [`GraspError::Config`] unless `0 < t_final < t_start` and
    /// `0 < decay < 1`.
    pub fn new(t_start: f64, t_final: f64, decay: f64) -> Result<Self> {
        validate_schedule(t_start, t_final, decay)?;
        Ok(Self {
            t_start,
            t_final,
            decay,
            temperature: t_start,
        })
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Default for Annealing {
    fn default() -> Self {
        Self {
            t_start: Self::DEFAULT_T_START,
            t_final: Self::DEFAULT_T_FINAL,
            decay: Self::DEFAULT_DECAY,
            temperature: Self::DEFAULT_T_START,
        }
    }
}

impl Acceptance for Annealing {
    fn name(&self) -> &str {
        "annealing"
    }

    fn reset(&mut self) {
        self.temperature = self.t_start;
    }

    fn accept(&mut self, delta: f64, rng: &mut StdRng) -> bool {
        delta < -IMPROVEMENT_EPS
            || (-(delta + IMPROVEMENT_EPS) / self.temperature).exp() > rng.random::<f64>()
    }

    fn on_accepted(&mut self) {
        self.temperature *= self.decay;
    }

    fn frozen(&self) -> bool {
        self.temperature < self.t_final
    }
}

pub(crate) fn validate_schedule(t_start: f64, t_final: f64, decay: f64) -> Result<()> {
    if !(t_start > 0.0 && t_start.is_finite()) {
        return Err(GraspError::Config(format!(
            "t_start must be positive, got {t_start}"
        )));
    }
    if !(t_final > 0.0 && t_final.is_finite()) {
        return Err(GraspError::Config(format!(
            "t_final must be positive, got {t_final}"
        )));
    }
    if t_final >= t_start {
        return Err(GraspError::Config(format!(
            "t_final ({t_final}) must be below t_start ({t_start})"
        )));
    }
    if !(decay > 0.0 && decay < 1.0) {
        return Err(GraspError::Config(format!(
            "decay must be in (0, 1), got {decay}"
        )));
    }
    Ok(())
}
