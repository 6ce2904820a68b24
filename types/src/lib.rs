//! Fundamental types for Soulbound ID.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! wallet addresses, timestamps, confidence scores, image payloads, the student
//! record schema, and the capture-device seam.

pub mod address;
pub mod capture;
pub mod confidence;
pub mod error;
pub mod photo;
pub mod record;
pub mod time;

pub use address::WalletAddress;
pub use capture::{CaptureDevice, CaptureError, CaptureStream};
pub use confidence::{Confidence, ACCEPTANCE_THRESHOLD};
pub use error::TypeError;
pub use photo::Photo;
pub use record::{StudentRecord, VerificationStatus, CURRENT_SCHEMA_VERSION};
pub use time::{Clock, SystemClock, Timestamp};
