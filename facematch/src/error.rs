use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceMatchError {
    /// Transport failure: connection refused, DNS, timeout, reset.
    #[error("network error calling {endpoint}: {reason}")]
    Network { endpoint: String, reason: String },

    /// The API answered with an `error_message`.
    #[error("face API error from {endpoint}: {message}")]
    Api { endpoint: String, message: String },

    #[error("face API {endpoint} returned HTTP {status}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("face API credentials are not configured")]
    MissingCredentials,

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FaceMatchError {
    /// Whether this is a connectivity-class failure.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
