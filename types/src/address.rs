//! Wallet address type used as the student registration key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypeError;

/// A public account identifier from the connected wallet.
///
/// The wallet SDK owns the address format; this type only guarantees the value
/// is non-empty and free of whitespace so it can serve as a storage key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse and validate an address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypeError::InvalidAddress("address is empty".into()));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidAddress(format!(
                "address contains whitespace: {s:?}"
            )));
        }
        Ok(Self(s))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display, e.g. `ABCDEFGH...UVWXYZ`.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 14 {
            return self.0.clone();
        }
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
