use soulbound_facematch::FaceMatchError;
use soulbound_store::StoreError;
use soulbound_types::{CaptureError, WalletAddress};
use thiserror::Error;

use crate::outcomes::ImageRole;
use crate::registration::RegistrationField;

/// A registration or verification request that cannot be acted on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please fill in all fields (missing: {})", join_fields(.0))]
    MissingFields(Vec<RegistrationField>),

    #[error("please upload both photo and ID photo (missing: {})", join_fields(.0))]
    MissingPhotos(Vec<RegistrationField>),

    #[error("wallet address not found, connect your wallet first")]
    NoWalletBound,

    #[error("{0} is not a valid base64 image")]
    InvalidPhoto(RegistrationField),

    #[error("no live capture provided, capture a selfie to verify")]
    NoLiveCapture,
}

fn join_fields(fields: &[RegistrationField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("wallet {0} is already registered")]
    AlreadyRegistered(WalletAddress),

    #[error("no registration found for wallet {0}, complete registration first")]
    NotRegistered(WalletAddress),

    #[error("wallet {0} is already verified")]
    AlreadyVerified(WalletAddress),

    #[error("no face detected in {0}")]
    NoFaceDetected(ImageRole),

    #[error("face comparison failed: {0}")]
    Comparison(#[from] FaceMatchError),

    #[error("camera error: {0}")]
    Camera(#[from] CaptureError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("credential export failed: {0}")]
    Export(String),
}
