//! Validated SHA-256 digests.

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

/// A malformed SHA-256 hex string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    /// Wrong number of hex characters.
    #[error("Invalid SHA256 digest: expected 64 hex characters, got {len} in '{input}'")]
    Length {
        /// Length of the hex portion.
        len: usize,
        /// The rejected input.
        input: String,
    },
    /// Non-hex characters present.
    #[error("Invalid SHA256 digest: contains non-hex characters in '{0}'")]
    NotHex(String),
}

/// A validated SHA256 digest (64 lowercase hex characters)
///
/// Every digest in the pipeline is either computed here from bytes or
/// validated at parse time, so comparisons are always between normalised
/// lowercase strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Create a new `Sha256Digest`, validating the input.
    ///
    /// Accepts strings with or without a `sha256:` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex portion is not exactly 64 ASCII hex characters.
    pub fn new(s: impl Into<String>) -> Result<Self, DigestError> {
        let s = s.into();
        let hex = s.strip_prefix("sha256:").unwrap_or(&s);

        if hex.len() != 64 {
            return Err(DigestError::Length {
                len: hex.len(),
                input: s.clone(),
            });
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DigestError::NotHex(s.clone()));
        }

        Ok(Self(hex.to_lowercase()))
    }

    /// Hash `data` with SHA-256.
    pub fn compute(data: &[u8]) -> Self {
        Self::from_hasher(Sha256::new_with_prefix(data))
    }

    /// Finish an incremental hasher.
    pub fn from_hasher(hasher: Sha256) -> Self {
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the digest as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Sha256Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Sha256Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
