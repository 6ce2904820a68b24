//! Credential export.

use soulbound_types::StudentRecord;

use crate::error::VerificationError;

/// Pretty-printed JSON of one record.
pub fn export_credential(record: &StudentRecord) -> Result<String, VerificationError> {
    serde_json::to_string_pretty(record).map_err(|e| VerificationError::Export(e.to_string()))
}

/// `credential-<name>.json`. Each run of whitespace in the name becomes an
/// underscore, and any other character outside `[A-Za-z0-9_-]` is replaced
/// by one, so the result is always a single path component.
pub fn credential_file_name(name: &str) -> String {
    let slug: String = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("credential-{slug}.json")
}
