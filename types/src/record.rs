//! The persisted student registration record.
//!
//! Field names serialize in camelCase to match the stored record list.
//! Required fields are plain; optional fields are `Option` and omitted when
//! unset. Records written before versioning carry no `schemaVersion` and read
//! as [`LEGACY_SCHEMA_VERSION`].

use serde::{Deserialize, Serialize};

use crate::{Confidence, Photo, Timestamp, TypeError, WalletAddress};

/// Version written by this crate.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Version assumed for records that predate the `schemaVersion` field.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;

fn legacy_schema_version() -> u32 {
    LEGACY_SCHEMA_VERSION
}

/// Verification status of a registered student.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Registered, no successful comparison yet.
    Pending,
    /// Live capture matched the reference photo.
    Verified,
    /// Last comparison fell at or below the acceptance threshold. Retryable.
    Failed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }
}

/// One student registration, keyed by wallet address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    pub name: String,
    pub college: String,
    pub department: String,
    /// Reference face photo compared against live captures.
    pub photo: Photo,
    /// Photo of the student ID card.
    pub id_photo: Photo,
    pub wallet_address: WalletAddress,
    /// Creation time.
    pub timestamp: Timestamp,
    pub verified: bool,
    pub verification_status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_confidence: Option<Confidence>,
    /// Time of the last completed comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_verification: Option<bool>,
}

impl StudentRecord {
    /// A freshly registered record in the pending state.
    pub fn pending(
        name: String,
        college: String,
        department: String,
        photo: Photo,
        id_photo: Photo,
        wallet_address: WalletAddress,
        now: Timestamp,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            name,
            college,
            department,
            photo,
            id_photo,
            wallet_address,
            timestamp: now,
            verified: false,
            verification_status: VerificationStatus::Pending,
            verification_confidence: None,
            verification_date: None,
            mock_verification: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Stamp the result of a face comparison onto the record.
    ///
    /// A matching confidence moves the record to `Verified`; anything else to
    /// `Failed`. The record is upgraded to the current schema version.
    pub fn apply_comparison(
        &mut self,
        confidence: Confidence,
        mock: bool,
        at: Timestamp,
    ) -> VerificationStatus {
        let status = if confidence.is_match() {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Failed
        };
        self.schema_version = CURRENT_SCHEMA_VERSION;
        self.verified = status == VerificationStatus::Verified;
        self.verification_status = status;
        self.verification_confidence = Some(confidence);
        self.verification_date = Some(at);
        self.mock_verification = Some(mock);
        status
    }

    /// Check the schema version and the status invariants.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(TypeError::UnsupportedSchema {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        let invalid = |reason: &str| TypeError::InvalidRecord {
            wallet: self.wallet_address.to_string(),
            reason: reason.to_string(),
        };
        match self.verification_status {
            VerificationStatus::Verified => {
                if !self.verified {
                    return Err(invalid("status is verified but verified flag is false"));
                }
                match self.verification_confidence {
                    Some(c) if c.is_match() => {}
                    Some(_) => return Err(invalid("verified with confidence below threshold")),
                    None => return Err(invalid("verified without confidence")),
                }
            }
            VerificationStatus::Failed => {
                if self.verified {
                    return Err(invalid("status is failed but verified flag is true"));
                }
                match self.verification_confidence {
                    Some(c) if !c.is_match() => {}
                    Some(_) => return Err(invalid("failed with confidence above threshold")),
                    None => return Err(invalid("failed without confidence")),
                }
            }
            VerificationStatus::Pending => {
                if self.verified {
                    return Err(invalid("status is pending but verified flag is true"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StudentRecord {
        StudentRecord::pending(
            "Ada Lovelace".into(),
            "Analytical College".into(),
            "Mathematics".into(),
            Photo::from_bytes("image/jpeg", b"face"),
            Photo::from_bytes("image/jpeg", b"card"),
            WalletAddress::parse("WALLETADA").unwrap(),
            Timestamp::from_millis(1_000),
        )
    }

    #[test]
    fn pending_record_defaults() {
        let r = record();
        assert!(!r.verified);
        assert_eq!(r.verification_status, VerificationStatus::Pending);
        assert_eq!(r.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn matching_comparison_verifies() {
        let mut r = record();
        let status = r.apply_comparison(
            Confidence::new(91.2).unwrap(),
            false,
            Timestamp::from_millis(2_000),
        );
        assert_eq!(status, VerificationStatus::Verified);
        assert!(r.verified);
        assert_eq!(r.verification_date, Some(Timestamp::from_millis(2_000)));
        assert_eq!(r.mock_verification, Some(false));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn low_comparison_fails_but_keeps_confidence() {
        let mut r = record();
        let status = r.apply_comparison(
            Confidence::new(80.0).unwrap(),
            false,
            Timestamp::from_millis(2_000),
        );
        assert_eq!(status, VerificationStatus::Failed);
        assert!(!r.verified);
        assert_eq!(r.verification_confidence.map(|c| c.value()), Some(80.0));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn validate_catches_inconsistent_status() {
        let mut r = record();
        r.verified = true;
        assert!(matches!(r.validate(), Err(TypeError::InvalidRecord { .. })));

        let mut r = record();
        r.verification_status = VerificationStatus::Verified;
        r.verified = true;
        r.verification_confidence = Some(Confidence::new(50.0).unwrap());
        assert!(r.validate().is_err());
    }

    #[test]
    fn validate_rejects_future_schema() {
        let mut r = record();
        r.schema_version = CURRENT_SCHEMA_VERSION + 1;
        assert!(matches!(
            r.validate(),
            Err(TypeError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn json_uses_camel_case_and_omits_unset_fields() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["walletAddress"], "WALLETADA");
        assert_eq!(json["verificationStatus"], "pending");
        assert!(json.get("idPhoto").is_some());
        assert!(json.get("verificationConfidence").is_none());
        assert!(json.get("mockVerification").is_none());
    }

    #[test]
    fn legacy_browser_record_parses() {
        let json = r#"{
            "name": "Grace Hopper",
            "college": "Navy College",
            "department": "Computing",
            "photo": "data:image/png;base64,iVBORw0KGgo=",
            "idPhoto": "data:image/png;base64,iVBORw0KGgo=",
            "walletAddress": "GRACEWALLET",
            "timestamp": "2024-03-01T10:15:30.250Z",
            "verified": true,
            "verificationStatus": "verified",
            "verificationConfidence": 85.5,
            "verificationDate": "2024-03-02T08:00:00.000Z",
            "mockVerification": true
        }"#;
        let r: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.schema_version, LEGACY_SCHEMA_VERSION);
        assert_eq!(r.mock_verification, Some(true));
        assert!(r.validate().is_ok());
    }
}
