//! Face-match results.

use serde::{Deserialize, Serialize};
use soulbound_types::Confidence;

/// Result of detecting faces in one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    /// Opaque per-face tokens issued by the provider.
    pub face_tokens: Vec<String>,
    /// Synthetic result produced by the fallback path.
    pub mock: bool,
}

impl Detection {
    pub fn face_found(&self) -> bool {
        !self.face_tokens.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.face_tokens.len()
    }
}

/// Provider confidence thresholds at fixed false-accept rates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(rename = "1e-3")]
    pub far_1e3: f64,
    #[serde(rename = "1e-4")]
    pub far_1e4: f64,
    #[serde(rename = "1e-5")]
    pub far_1e5: f64,
}

/// Result of comparing two faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub confidence: Confidence,
    /// `confidence` clears the acceptance threshold.
    pub verified: bool,
    pub thresholds: Option<Thresholds>,
    pub mock: bool,
}

impl Comparison {
    pub fn new(confidence: Confidence, thresholds: Option<Thresholds>, mock: bool) -> Self {
        Self {
            confidence,
            verified: confidence.is_match(),
            thresholds,
            mock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_follows_threshold() {
        let high = Comparison::new(Confidence::new(97.3).unwrap(), None, false);
        let edge = Comparison::new(Confidence::new(80.0).unwrap(), None, false);
        assert!(high.verified);
        assert!(!edge.verified);
    }

    #[test]
    fn thresholds_use_provider_keys() {
        let t: Thresholds =
            serde_json::from_str(r#"{"1e-3": 62.327, "1e-4": 69.101, "1e-5": 73.975}"#).unwrap();
        assert_eq!(t.far_1e4, 69.101);
    }
}
