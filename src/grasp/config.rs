//! GRASP configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::{Alpha, ConstructiveKind};
use crate::error::{GraspError, Result};
use crate::local_search::LocalSearchKind;

/// Seed used when none is configured, so unseeded runs stay reproducible.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration parameters for GRASP.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_grasp::constructive::{Alpha, ConstructiveKind};
/// use u_grasp::grasp::GraspConfig;
/// use u_grasp::local_search::LocalSearchKind;
///
/// let config = GraspConfig::default()
///     .with_constructive(ConstructiveKind::SemiGreedyInsertion)
///     .with_alpha(Alpha::range(0.3, 0.9))
///     .with_local_search(LocalSearchKind::annealing())
///     .with_max_iter(50)
///     .with_time_limit(Duration::from_secs(5))
///     .with_seed(7);
/// assert_eq!(config.max_iter, 50);
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading from TOML; `time_limit` is in seconds:
///
/// ```
/// use std::time::Duration;
/// use u_grasp::grasp::GraspConfig;
///
/// let config = GraspConfig::from_toml_str(r#"
///     constructive = "semi_greedy_arc"
///     alpha = { low = 0.2, high = 0.8 }
///     max_iter = 200
///     time_limit = 1.5
///
///     [local_search]
///     type = "annealing"
///     decay = 0.95
/// "#).unwrap();
/// assert_eq!(config.time_limit, Some(Duration::from_millis(1500)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Heuristic building each starting tour.
    pub constructive: ConstructiveKind,
    /// Random seed (None uses [`DEFAULT_SEED`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Wall-clock budget checked before each iteration (None for unbounded).
    #[serde(with = "seconds", skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<Duration>,
    /// Maximum construct-and-improve iterations.
    pub max_iter: usize,
    /// Maximum local-search passes per iteration.
    pub max_moves: usize,
    /// Stop as soon as the incumbent costs at most this much.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    /// RCL greediness for the semi-greedy heuristics.
    pub alpha: Alpha,
    /// Improvement applied to every constructed tour.
    pub local_search: LocalSearchKind,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            constructive: ConstructiveKind::default(),
            seed: None,
            time_limit: None,
            max_iter: 10_000,
            max_moves: 100_000,
            target: None,
            alpha: Alpha::default(),
            local_search: LocalSearchKind::default(),
        }
    }
}

impl GraspConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every option lies in its admissible range.
    ///
    /// # Errors
    ///
    /// [`GraspError::Config`] naming the offending option.
    pub fn validate(&self) -> Result<()> {
        self.alpha.validate()?;
        self.local_search.validate()?;
        if let Some(target) = self.target {
            if target.is_nan() {
                return Err(GraspError::Config("target must not be NaN".into()));
            }
        }
        Ok(())
    }

    /// Seed actually used by the run.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Sets the constructive heuristic.
    pub fn with_constructive(mut self, kind: ConstructiveKind) -> Self {
        self.constructive = kind;
        self
    }

    /// Sets the RCL greediness.
    pub fn with_alpha(mut self, alpha: impl Into<Alpha>) -> Self {
        self.alpha = alpha.into();
        self
    }

    /// Sets the local search.
    pub fn with_local_search(mut self, kind: LocalSearchKind) -> Self {
        self.local_search = kind;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iter(mut self, n: usize) -> Self {
        self.max_iter = n;
        self
    }

    /// Sets the maximum local-search passes per iteration.
    pub fn with_max_moves(mut self, n: usize) -> Self {
        self.max_moves = n;
        self
    }

    /// Sets the early-stop cost target.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }
}

/// `Option<Duration>` as fractional seconds.
mod seconds {
    use std::time::Duration;

    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs_f64()).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(d)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraspConfig::default();
        assert_eq!(config.constructive, ConstructiveKind::CheapestArc);
        assert_eq!(config.local_search, LocalSearchKind::Descent);
        assert_eq!(config.max_iter, 10_000);
        assert_eq!(config.max_moves, 100_000);
        assert_eq!(config.time_limit, None);
        assert_eq!(config.target, None);
        assert_eq!(config.effective_seed(), DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = GraspConfig::default()
            .with_alpha(0.4)
            .with_max_moves(10)
            .with_target(12.5)
            .with_seed(3);
        assert_eq!(config.alpha, Alpha::Fixed(0.4));
        assert_eq!(config.max_moves, 10);
        assert_eq!(config.target, Some(12.5));
        assert_eq!(config.effective_seed(), 3);
    }

    #[test]
    fn test_toml_empty_is_default() {
        let config = GraspConfig::from_toml_str("").expect("empty toml");
        assert_eq!(config, GraspConfig::default());
    }

    #[test]
    fn test_toml_full() {
        let config = GraspConfig::from_toml_str(
            r#"
            constructive = "random_insertion"
            alpha = 0.25
            seed = 11
            time_limit = 0.0
            max_iter = 5
            max_moves = 7
            target = 100.0

            [local_search]
            type = "annealing"
            t_start = 3.0
            t_final = 0.01
            decay = 0.9
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.constructive, ConstructiveKind::RandomInsertion);
        assert_eq!(config.alpha, Alpha::Fixed(0.25));
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.time_limit, Some(Duration::ZERO));
        assert_eq!(
            config.local_search,
            LocalSearchKind::Annealing {
                t_start: 3.0,
                t_final: 0.01,
                decay: 0.9
            }
        );
        assert_eq!(config.target, Some(100.0));
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let err = GraspConfig::from_toml_str("alpha = 1.5").unwrap_err();
        assert!(matches!(err, GraspError::Config(_)));

        let err = GraspConfig::from_toml_str("[local_search]\ntype = \"annealing\"\ndecay = 2.0")
            .unwrap_err();
        assert!(matches!(err, GraspError::Config(_)));

        let err = GraspConfig::from_toml_str(
            "[local_search]\ntype = \"annealing\"\nt_start = 1.0\nt_final = 5.0",
        )
        .unwrap_err();
        assert!(matches!(err, GraspError::Config(_)));

        let err = GraspConfig::from_toml_str("time_limit = -1.0").unwrap_err();
        assert!(matches!(err, GraspError::Toml(_)));

        let err = GraspConfig::from_toml_str("max_iter = \"many\"").unwrap_err();
        assert!(matches!(err, GraspError::Toml(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GraspConfig::default()
            .with_constructive(ConstructiveKind::SemiGreedyArc)
            .with_alpha(Alpha::range(0.1, 0.6))
            .with_time_limit(Duration::from_millis(250))
            .with_local_search(LocalSearchKind::annealing());
        let text = toml::to_string(&config).expect("serializable");
        assert_eq!(GraspConfig::from_toml_str(&text).expect("parses"), config);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = GraspConfig::from_toml_file("/nonexistent/grasp.toml").unwrap_err();
        assert!(matches!(err, GraspError::Io(_)));
    }
}
