//! Face detection and face-pair comparison.
//!
//! The [`FaceMatcher`] trait is the seam the verification workflow talks to.
//! [`FaceMatchClient`] implements it over the Face++ HTTP API and applies a
//! [`FallbackMode`]: with `MockOnFailure` a missing credential pair or a
//! connectivity failure yields deterministic mock results instead of an
//! error, so a demo deployment never hard-fails. `Strict` surfaces both.

pub mod api;
pub mod client;
pub mod error;
pub mod mock;
pub mod types;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use soulbound_types::Photo;

pub use api::{Credentials, FacePlusPlusApi, DEFAULT_API_URL};
pub use client::{FaceMatchClient, FaceMatchConfig};
pub use error::FaceMatchError;
pub use types::{Comparison, Detection, Thresholds};

/// Face detection and comparison provider.
#[async_trait]
pub trait FaceMatcher: Send + Sync {
    /// Detect faces in one image.
    async fn detect_face(&self, image: &Photo) -> Result<Detection, FaceMatchError>;

    /// Compare the most prominent face of each image.
    async fn compare_faces(&self, a: &Photo, b: &Photo) -> Result<Comparison, FaceMatchError>;
}

#[async_trait]
impl<T: FaceMatcher + ?Sized> FaceMatcher for Arc<T> {
    async fn detect_face(&self, image: &Photo) -> Result<Detection, FaceMatchError> {
        (**self).detect_face(image).await
    }

    async fn compare_faces(&self, a: &Photo, b: &Photo) -> Result<Comparison, FaceMatchError> {
        (**self).compare_faces(a, b).await
    }
}

/// What to do when real results are unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackMode {
    /// Missing credentials and connectivity failures are errors.
    Strict,
    /// Missing credentials and connectivity failures produce mock results.
    #[default]
    MockOnFailure,
}

impl FallbackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::MockOnFailure => "mock-on-failure",
        }
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "mock-on-failure" | "mock" => Ok(Self::MockOnFailure),
            other => Err(format!("unknown fallback mode: {other}")),
        }
    }
}
