//! Face-similarity confidence score.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypeError;

/// Confidence strictly above this value counts as a face match.
///
/// Fixed by policy; not configurable.
pub const ACCEPTANCE_THRESHOLD: f64 = 80.0;

/// A similarity score in `0.0..=100.0` returned by the face-match API.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Result<Self, TypeError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(TypeError::InvalidConfidence(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether this score clears [`ACCEPTANCE_THRESHOLD`].
    pub fn is_match(&self) -> bool {
        self.0 > ACCEPTANCE_THRESHOLD
    }
}

impl TryFrom<f64> for Confidence {
    type Error = TypeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!Confidence::new(80.0).unwrap().is_match());
        assert!(Confidence::new(80.01).unwrap().is_match());
        assert!(!Confidence::new(42.0).unwrap().is_match());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(100.5).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Confidence::new(85.5).unwrap().to_string(), "85.50%");
    }

    #[test]
    fn deserialize_validates_range() {
        assert!(serde_json::from_str::<Confidence>("97.3").is_ok());
        assert!(serde_json::from_str::<Confidence>("130").is_err());
    }
}
