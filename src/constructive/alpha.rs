//! Greediness parameter for restricted candidate lists.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GraspError, Result};

const ALPHA_MIN: f64 = 1e-6;
const ALPHA_MAX: f64 = 0.99999;

/// RCL greediness: `1` keeps only the best candidates, `0` admits all.
///
/// A range is sampled uniformly once per construction. Either form is
/// clamped into `[1e-6, 0.99999]` after drawing.
///
/// Serialized untagged, so TOML accepts `alpha = 0.8` as well as
/// `alpha = { low = 0.2, high = 1.0 }`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_grasp::constructive::Alpha;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let a = Alpha::range(0.2, 0.4).draw(&mut rng);
/// assert!((0.2..=0.4).contains(&a));
/// assert_eq!(Alpha::Fixed(1.0).draw(&mut rng), 0.99999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Alpha {
    /// The same alpha for every construction.
    Fixed(f64),
    /// Uniformly drawn from `[low, high]` for every construction.
    Range {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
}

impl Default for Alpha {
    fn default() -> Self {
        Self::Range {
            low: 0.0,
            high: 1.0,
        }
    }
}

impl Alpha {
    /// Shorthand for [`Alpha::Range`].
    pub fn range(low: f64, high: f64) -> Self {
        Self::Range { low, high }
    }

    /// Draws the alpha used for one construction.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        let raw = match *self {
            Self::Fixed(a) => a,
            Self::Range { low, high } => low + rng.random::<f64>() * (high - low),
        };
        raw.clamp(ALPHA_MIN, ALPHA_MAX)
    }

    /// Checks bounds lie in `[0, 1]` and ranges are ordered.
    pub fn validate(&self) -> Result<()> {
        let (low, high) = match *self {
            Self::Fixed(a) => (a, a),
            Self::Range { low, high } => (low, high),
        };
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) {
            return Err(GraspError::Config(format!(
                "alpha bounds must lie in [0, 1], got [{low}, {high}]"
            )));
        }
        if low > high {
            return Err(GraspError::Config(format!(
                "alpha range is inverted: low {low} > high {high}"
            )));
        }
        Ok(())
    }
}

impl From<f64> for Alpha {
    fn from(a: f64) -> Self {
        Self::Fixed(a)
    }
}

impl From<(f64, f64)> for Alpha {
    fn from((low, high): (f64, f64)) -> Self {
        Self::Range { low, high }
    }
}
