//! Base64 image payloads.
//!
//! Photos travel as base64 strings, usually `data:<mime>;base64,<payload>` URLs
//! produced by the capture side. The string is kept verbatim so a stored
//! record reproduces its images byte-for-byte.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypeError;

const BASE64_MARKER: &str = ";base64,";

/// A base64-encoded image, either a data URL or a bare payload.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(String);

impl Photo {
    /// Wrap an encoded image, checking that the payload decodes.
    pub fn parse(encoded: impl Into<String>) -> Result<Self, TypeError> {
        let photo = Self(encoded.into());
        photo.decode()?;
        Ok(photo)
    }

    /// Encode raw image bytes as a data URL.
    pub fn from_bytes(content_type: &str, bytes: &[u8]) -> Self {
        Self(format!(
            "data:{content_type}{BASE64_MARKER}{}",
            STANDARD.encode(bytes)
        ))
    }

    /// The full stored string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }

    /// The base64 payload without any data-URL prefix.
    pub fn payload(&self) -> &str {
        match self.0.split_once(',') {
            Some((_, payload)) => payload,
            None => &self.0,
        }
    }

    /// MIME type from the data-URL prefix, if there is one.
    pub fn content_type(&self) -> Option<&str> {
        let (head, _) = self.0.split_once(BASE64_MARKER)?;
        head.strip_prefix("data:")
    }

    /// Decode the payload into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, TypeError> {
        if self.is_empty() {
            return Err(TypeError::InvalidPhoto("image payload is empty".into()));
        }
        STANDARD
            .decode(self.payload())
            .map_err(|e| TypeError::InvalidPhoto(format!("malformed base64: {e}")))
    }
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads run to hundreds of kilobytes.
        f.debug_struct("Photo")
            .field("content_type", &self.content_type())
            .field("payload_len", &self.payload().len())
            .finish()
    }
}
