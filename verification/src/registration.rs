//! Registration form validation and duplicate handling.

use serde::{Deserialize, Serialize};
use soulbound_types::{Photo, StudentRecord, Timestamp, WalletAddress};

use crate::error::ValidationError;

/// A field of the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    Name,
    College,
    Department,
    Photo,
    IdPhoto,
}

impl RegistrationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::College => "college",
            Self::Department => "department",
            Self::Photo => "photo",
            Self::IdPhoto => "ID photo",
        }
    }
}

impl std::fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What registration does when the wallet already has a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Refuse the registration.
    #[default]
    Reject,
    /// Append another record for the same wallet. Lookups keep returning the
    /// first one.
    Append,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "append" => Ok(Self::Append),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

/// Registration input as entered by the student.
#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub college: String,
    pub department: String,
    pub photo: Option<Photo>,
    pub id_photo: Option<Photo>,
}

impl RegistrationForm {
    /// Validate the form and build a pending record.
    ///
    /// Checks run in order and the first failing check is reported:
    /// text fields, photo presence, wallet binding, photo encoding.
    pub fn validate(
        &self,
        wallet: Option<&WalletAddress>,
        now: Timestamp,
    ) -> Result<StudentRecord, ValidationError> {
        let missing: Vec<_> = [
            (RegistrationField::Name, &self.name),
            (RegistrationField::College, &self.college),
            (RegistrationField::Department, &self.department),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let present = |p: &Option<Photo>| p.as_ref().filter(|p| !p.is_empty()).cloned();
        let (photo, id_photo) = match (present(&self.photo), present(&self.id_photo)) {
            (Some(photo), Some(id_photo)) => (photo, id_photo),
            (photo, id_photo) => {
                let mut missing = Vec::new();
                if photo.is_none() {
                    missing.push(RegistrationField::Photo);
                }
                if id_photo.is_none() {
                    missing.push(RegistrationField::IdPhoto);
                }
                return Err(ValidationError::MissingPhotos(missing));
            }
        };

        let wallet = wallet.ok_or(ValidationError::NoWalletBound)?;

        if photo.decode().is_err() {
            return Err(ValidationError::InvalidPhoto(RegistrationField::Photo));
        }
        if id_photo.decode().is_err() {
            return Err(ValidationError::InvalidPhoto(RegistrationField::IdPhoto));
        }

        Ok(StudentRecord::pending(
            self.name.trim().to_string(),
            self.college.trim().to_string(),
            self.department.trim().to_string(),
            photo,
            id_photo,
            wallet.clone(),
            now,
        ))
    }
}
