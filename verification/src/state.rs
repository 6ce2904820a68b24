//! Verification phase of a wallet.

use serde::{Deserialize, Serialize};
use soulbound_types::{StudentRecord, VerificationStatus};

/// Where a wallet stands in the registration/verification lifecycle.
///
/// ```text
/// Unregistered -> Pending -> Verified
///                    |
///                    +-> Failed -> (retry) -> Verified | Failed
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPhase {
    /// No record for the wallet.
    Unregistered,
    /// Registered, not yet compared.
    Pending,
    /// Live capture matched the reference photo. Terminal.
    Verified,
    /// Last comparison did not match. Retryable.
    Failed,
}

impl VerificationPhase {
    /// Derive the phase from a stored record, if there is one.
    pub fn of(record: Option<&StudentRecord>) -> Self {
        match record.map(|r| r.verification_status) {
            None => Self::Unregistered,
            Some(VerificationStatus::Pending) => Self::Pending,
            Some(VerificationStatus::Verified) => Self::Verified,
            Some(VerificationStatus::Failed) => Self::Failed,
        }
    }

    /// Whether a verification attempt may start from this phase.
    pub fn can_verify(&self) -> bool {
        matches!(self, Self::Pending | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for VerificationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
