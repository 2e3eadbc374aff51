//! Error types.

use thiserror::Error;

/// Errors produced while validating input or loading configuration.
///
/// Reaching a time, iteration, or pass budget is not an error: the GRASP
/// driver reports it through [`GraspResult`](crate::grasp::GraspResult).
#[derive(Debug, Error)]
pub enum GraspError {
    /// Malformed distance matrix or tour sequence.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Option value outside its admissible range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed row in a coordinate file.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the row.
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, GraspError>;
