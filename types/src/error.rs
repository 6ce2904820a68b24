//! Error type shared by the fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("confidence {0} is outside 0..=100")]
    InvalidConfidence(f64),

    #[error("invalid photo: {0}")]
    InvalidPhoto(String),

    #[error("record schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("invalid record for {wallet}: {reason}")]
    InvalidRecord { wallet: String, reason: String },
}
