//! Face++ HTTP transport.
//!
//! Two endpoints, both `multipart/form-data` POSTs authenticated with an API
//! key/secret pair:
//! - `{base}/detect`: `image_base64`, `return_attributes=none`
//! - `{base}/compare`: `image_base64_1`, `image_base64_2`
//!
//! Images are sent as the bare base64 payload (no data-URL prefix).

use std::fmt;
use std::time::Duration;

use reqwest::multipart::Form;
use serde::Deserialize;
use soulbound_types::{Confidence, Photo};
use zeroize::Zeroizing;

use crate::error::FaceMatchError;
use crate::types::{Comparison, Detection, Thresholds};

/// Default Face++ v3 base URL (US region).
pub const DEFAULT_API_URL: &str = "https://api-us.faceplusplus.com/facepp/v3";

/// Value shipped in sample environment files; treated as "not configured".
const PLACEHOLDER_KEY: &str = "your_api_key_here";

/// Face++ API key/secret pair.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: Zeroizing<String>,
}

impl Credentials {
    /// Build credentials, or `None` when either part is missing, blank, or the
    /// sample placeholder.
    pub fn from_parts(api_key: Option<&str>, api_secret: Option<&str>) -> Option<Self> {
        let key = api_key.map(str::trim).filter(|k| !k.is_empty())?;
        let secret = api_secret.map(str::trim).filter(|s| !s.is_empty())?;
        if key == PLACEHOLDER_KEY {
            return None;
        }
        Some(Self {
            api_key: key.to_string(),
            api_secret: Zeroizing::new(secret.to_string()),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    faces: Vec<DetectedFace>,
}

#[derive(Deserialize)]
struct DetectedFace {
    face_token: String,
}

#[derive(Deserialize)]
struct CompareResponse {
    confidence: Option<f64>,
    thresholds: Option<Thresholds>,
}

/// HTTP client for the Face++ detect and compare endpoints.
#[derive(Clone)]
pub struct FacePlusPlusApi {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl FacePlusPlusApi {
    /// Create a client. Without `timeout` the transport defaults apply.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, FaceMatchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FaceMatchError::Client(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authenticated_form(&self) -> Form {
        Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("api_secret", self.credentials.api_secret.to_string())
    }

    /// POST a form and return the decoded JSON body.
    ///
    /// A body carrying `error_message` is an API error whatever the status.
    async fn post_form(
        &self,
        endpoint: &str,
        form: Form,
    ) -> Result<serde_json::Value, FaceMatchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        let json: Option<serde_json::Value> = serde_json::from_str(&body).ok();

        if let Some(message) = json
            .as_ref()
            .and_then(|v| v.get("error_message"))
            .and_then(|m| m.as_str())
        {
            return Err(FaceMatchError::Api {
                endpoint: endpoint.to_string(),
                message: message.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FaceMatchError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        json.ok_or_else(|| FaceMatchError::Decode {
            endpoint: endpoint.to_string(),
            reason: "response body is not JSON".into(),
        })
    }

    /// Detect faces in one image.
    pub async fn detect(&self, image: &Photo) -> Result<Detection, FaceMatchError> {
        let form = self
            .authenticated_form()
            .text("image_base64", image.payload().to_string())
            .text("return_attributes", "none");
        let value = self.post_form("detect", form).await?;

        let resp: DetectResponse =
            serde_json::from_value(value).map_err(|e| FaceMatchError::Decode {
                endpoint: "detect".into(),
                reason: e.to_string(),
            })?;
        tracing::debug!(faces = resp.faces.len(), "face detection complete");

        Ok(Detection {
            face_tokens: resp.faces.into_iter().map(|f| f.face_token).collect(),
            mock: false,
        })
    }

    /// Compare the faces in two images.
    pub async fn compare(&self, a: &Photo, b: &Photo) -> Result<Comparison, FaceMatchError> {
        let form = self
            .authenticated_form()
            .text("image_base64_1", a.payload().to_string())
            .text("image_base64_2", b.payload().to_string());
        let value = self.post_form("compare", form).await?;

        let resp: CompareResponse =
            serde_json::from_value(value).map_err(|e| FaceMatchError::Decode {
                endpoint: "compare".into(),
                reason: e.to_string(),
            })?;
        let score = resp.confidence.ok_or_else(|| FaceMatchError::Decode {
            endpoint: "compare".into(),
            reason: "response has no confidence".into(),
        })?;
        let confidence = Confidence::new(score).map_err(|e| FaceMatchError::Decode {
            endpoint: "compare".into(),
            reason: e.to_string(),
        })?;
        tracing::debug!(%confidence, "face comparison complete");

        Ok(Comparison::new(confidence, resp.thresholds, false))
    }
}

fn transport_error(endpoint: &str, e: reqwest::Error) -> FaceMatchError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        FaceMatchError::Network {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    } else {
        FaceMatchError::Client(format!("{endpoint}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_and_blank_credentials_are_absent() {
        assert!(Credentials::from_parts(None, Some("s")).is_none());
        assert!(Credentials::from_parts(Some("k"), None).is_none());
        assert!(Credentials::from_parts(Some("  "), Some("s")).is_none());
        assert!(Credentials::from_parts(Some("your_api_key_here"), Some("s")).is_none());
        assert!(Credentials::from_parts(Some("k"), Some("s")).is_some());
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = Credentials::from_parts(Some("key"), Some("hunter2")).unwrap();
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("key"));
        assert!(!dbg.contains("hunter2"));
    }
}
