//! Results of verification attempts and photo cross-checks.

use serde::Serialize;
use soulbound_types::{Confidence, StudentRecord, WalletAddress};

/// Which image a face-detection result refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageRole {
    /// The registered reference photo.
    Reference,
    /// The selfie captured for this attempt.
    LiveCapture,
    /// The registered ID card photo.
    IdPhoto,
}

impl std::fmt::Display for ImageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Reference => "uploaded photo",
            Self::LiveCapture => "live selfie",
            Self::IdPhoto => "ID photo",
        })
    }
}

/// A completed comparison. The record is the stored state after the write.
#[derive(Clone, Debug, PartialEq)]
pub enum VerificationOutcome {
    Verified {
        record: StudentRecord,
        confidence: Confidence,
        mock: bool,
    },
    Failed {
        record: StudentRecord,
        confidence: Confidence,
        mock: bool,
    },
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    pub fn record(&self) -> &StudentRecord {
        match self {
            Self::Verified { record, .. } | Self::Failed { record, .. } => record,
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Verified { confidence, .. } | Self::Failed { confidence, .. } => *confidence,
        }
    }

    pub fn is_mock(&self) -> bool {
        match self {
            Self::Verified { mock, .. } | Self::Failed { mock, .. } => *mock,
        }
    }

    /// User-facing result text.
    pub fn message(&self) -> String {
        match self {
            Self::Verified {
                confidence, mock, ..
            } => format!(
                "Face verified successfully! Live selfie matches uploaded photo. Confidence: {confidence}{}",
                if *mock { " (Mock Mode)" } else { "" }
            ),
            Self::Failed { confidence, .. } => format!(
                "Face verification failed. Live selfie does not match uploaded photo. \
                 Confidence: {confidence}. Please try again ensuring good lighting and face the camera directly."
            ),
        }
    }
}

/// Result of comparing one record's reference photo with its ID photo.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossCheckReport {
    pub wallet_address: WalletAddress,
    pub name: String,
    pub result: CrossCheckResult,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CrossCheckResult {
    Compared {
        confidence: Confidence,
        matched: bool,
        mock: bool,
    },
    NoFace {
        image: ImageRole,
    },
    Error {
        message: String,
    },
}

impl CrossCheckReport {
    pub fn matched(&self) -> bool {
        matches!(self.result, CrossCheckResult::Compared { matched: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbound_types::{Photo, Timestamp};

    fn record() -> StudentRecord {
        StudentRecord::pending(
            "A".into(),
            "B".into(),
            "C".into(),
            Photo::from_bytes("image/png", b"p"),
            Photo::from_bytes("image/png", b"i"),
            WalletAddress::parse("W").unwrap(),
            Timestamp::from_millis(0),
        )
    }

    #[test]
    fn success_message_shows_two_decimals_and_mock_suffix() {
        let outcome = VerificationOutcome::Verified {
            record: record(),
            confidence: Confidence::new(85.5).unwrap(),
            mock: true,
        };
        let msg = outcome.message();
        assert!(msg.contains("Confidence: 85.50%"));
        assert!(msg.ends_with("(Mock Mode)"));
    }

    #[test]
    fn failure_message_gives_guidance() {
        let outcome = VerificationOutcome::Failed {
            record: record(),
            confidence: Confidence::new(42.0).unwrap(),
            mock: false,
        };
        let msg = outcome.message();
        assert!(msg.contains("42.00%"));
        assert!(msg.contains("good lighting"));
        assert!(!outcome.is_verified());
    }
}
