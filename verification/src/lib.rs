//! Student verification workflow.
//!
//! Students register against a connected wallet address and later prove their
//! identity with a live selfie:
//! 1. **Registration**: form validation, duplicate handling, pending record.
//! 2. **Verification**: face detection on both images, comparison, and the
//!    resulting `verified` or `failed` status written back to the record.
//!
//! A failed comparison can be retried; a verified record is final.

pub mod camera;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod outcomes;
pub mod registration;
pub mod state;

pub use camera::{capture_once, CameraSession};
pub use error::{ValidationError, VerificationError};
pub use export::{credential_file_name, export_credential};
pub use orchestrator::{Landing, VerificationWorkflow};
pub use outcomes::{CrossCheckReport, CrossCheckResult, ImageRole, VerificationOutcome};
pub use registration::{DuplicatePolicy, RegistrationField, RegistrationForm};
pub use state::VerificationPhase;
