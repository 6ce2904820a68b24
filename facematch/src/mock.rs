//! Deterministic mock results for demo mode.

use soulbound_types::{Confidence, Timestamp};

use crate::types::{Comparison, Detection, Thresholds};

/// Confidence reported by a mock comparison.
pub const MOCK_CONFIDENCE: f64 = 85.5;

pub const MOCK_THRESHOLDS: Thresholds = Thresholds {
    far_1e3: 62.327,
    far_1e4: 69.101,
    far_1e5: 74.399,
};

/// One synthetic face.
pub fn mock_detection() -> Detection {
    Detection {
        face_tokens: vec![format!("mock_token_{}", Timestamp::now().as_millis())],
        mock: true,
    }
}

/// A synthetic successful comparison.
pub fn mock_comparison() -> Comparison {
    let confidence = Confidence::new(MOCK_CONFIDENCE).unwrap_or(Confidence::ZERO);
    Comparison::new(confidence, Some(MOCK_THRESHOLDS), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_comparison_is_a_verified_match() {
        let c = mock_comparison();
        assert_eq!(c.confidence.value(), 85.5);
        assert!(c.verified);
        assert!(c.mock);
    }

    #[test]
    fn mock_detection_finds_one_face() {
        let d = mock_detection();
        assert!(d.face_found());
        assert_eq!(d.face_count(), 1);
        assert!(d.face_tokens[0].starts_with("mock_token_"));
    }
}
