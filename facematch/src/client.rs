//! Face match client with an explicit fallback policy.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use soulbound_types::Photo;

use crate::api::{Credentials, FacePlusPlusApi, DEFAULT_API_URL};
use crate::error::FaceMatchError;
use crate::mock::{mock_comparison, mock_detection};
use crate::types::{Comparison, Detection};
use crate::{FaceMatcher, FallbackMode};

/// Settings for [`FaceMatchClient`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceMatchConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_secret: Option<String>,

    #[serde(default)]
    pub fallback: FallbackMode,

    /// Request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for FaceMatchConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            api_secret: None,
            fallback: FallbackMode::default(),
            timeout_secs: None,
        }
    }
}

/// [`FaceMatcher`] over Face++ that applies a [`FallbackMode`].
///
/// Images are validated before anything else; a malformed image is an error
/// in every mode.
pub struct FaceMatchClient {
    api: Option<FacePlusPlusApi>,
    fallback: FallbackMode,
}

impl FaceMatchClient {
    pub fn new(api: Option<FacePlusPlusApi>, fallback: FallbackMode) -> Self {
        Self { api, fallback }
    }

    pub fn from_config(config: &FaceMatchConfig) -> Result<Self, FaceMatchError> {
        let credentials =
            Credentials::from_parts(config.api_key.as_deref(), config.api_secret.as_deref());
        let api = match credentials {
            Some(credentials) => Some(FacePlusPlusApi::new(
                config.api_url.clone(),
                credentials,
                config.timeout_secs.map(Duration::from_secs),
            )?),
            None => None,
        };
        Ok(Self::new(api, config.fallback))
    }

    /// Whether every call will be answered by the mock path.
    pub fn is_mock_mode(&self) -> bool {
        self.api.is_none() && self.fallback == FallbackMode::MockOnFailure
    }

    pub fn fallback(&self) -> FallbackMode {
        self.fallback
    }

    fn without_credentials<T>(&self, mock: impl FnOnce() -> T) -> Result<T, FaceMatchError> {
        match self.fallback {
            FallbackMode::MockOnFailure => {
                tracing::warn!("face API credentials not configured, using mock result");
                Ok(mock())
            }
            FallbackMode::Strict => Err(FaceMatchError::MissingCredentials),
        }
    }

    fn recover<T>(
        &self,
        result: Result<T, FaceMatchError>,
        mock: impl FnOnce() -> T,
    ) -> Result<T, FaceMatchError> {
        match result {
            Err(e) if e.is_connectivity() && self.fallback == FallbackMode::MockOnFailure => {
                tracing::warn!(error = %e, "face API unreachable, using mock result");
                Ok(mock())
            }
            other => other,
        }
    }
}

fn check_image(image: &Photo) -> Result<(), FaceMatchError> {
    image
        .decode()
        .map(|_| ())
        .map_err(|e| FaceMatchError::InvalidImage(e.to_string()))
}

#[async_trait]
impl FaceMatcher for FaceMatchClient {
    async fn detect_face(&self, image: &Photo) -> Result<Detection, FaceMatchError> {
        check_image(image)?;
        let Some(api) = &self.api else {
            return self.without_credentials(mock_detection);
        };
        self.recover(api.detect(image).await, mock_detection)
    }

    async fn compare_faces(&self, a: &Photo, b: &Photo) -> Result<Comparison, FaceMatchError> {
        check_image(a)?;
        check_image(b)?;
        let Some(api) = &self.api else {
            return self.without_credentials(mock_comparison);
        };
        self.recover(api.compare(a, b).await, mock_comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Photo {
        Photo::from_bytes("image/jpeg", b"jpeg bytes")
    }

    #[tokio::test]
    async fn absent_credentials_mock_by_default() {
        let client = FaceMatchClient::from_config(&FaceMatchConfig::default()).unwrap();
        assert!(client.is_mock_mode());

        let detection = client.detect_face(&image()).await.unwrap();
        assert!(detection.mock && detection.face_found());

        let comparison = client.compare_faces(&image(), &image()).await.unwrap();
        assert_eq!(comparison.confidence.value(), 85.5);
        assert!(comparison.verified && comparison.mock);
    }

    #[tokio::test]
    async fn absent_credentials_fail_in_strict_mode() {
        let config = FaceMatchConfig {
            fallback: FallbackMode::Strict,
            ..Default::default()
        };
        let client = FaceMatchClient::from_config(&config).unwrap();
        assert!(!client.is_mock_mode());
        assert!(matches!(
            client.compare_faces(&image(), &image()).await,
            Err(FaceMatchError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn malformed_image_fails_even_in_mock_mode() {
        let client = FaceMatchClient::new(None, FallbackMode::MockOnFailure);
        let bad = Photo::from_bytes("image/jpeg", b"x");
        let bad = serde_json::from_value::<Photo>(serde_json::json!(format!(
            "{}!!",
            bad.as_str()
        )))
        .unwrap();
        assert!(matches!(
            client.detect_face(&bad).await,
            Err(FaceMatchError::InvalidImage(_))
        ));
    }
}
