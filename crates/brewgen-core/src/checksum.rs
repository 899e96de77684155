//! Upstream checksum documents (`SHA256SUMS`, `checksums.txt`, `<asset>.sha256`).
//!
//! Release authors publish digests in a handful of layouts; all of them are
//! reduced to a filename → digest map.

use std::collections::BTreeMap;

use brewgen_schema::{ReleaseAsset, Sha256Digest};
use thiserror::Error;

/// An upstream checksum document that yielded nothing usable.
#[derive(Error, Debug)]
pub enum ChecksumError {
    /// The checksum document is not UTF-8 text.
    #[error("checksum file is not valid UTF-8")]
    NotText,
}

/// Parsed upstream checksums.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: BTreeMap<String, Sha256Digest>,
    /// A document that consisted of a single bare digest.
    bare: Option<Sha256Digest>,
}

impl ChecksumManifest {
    /// Parse a checksum document. Lines that match no known layout are skipped.
    ///
    /// Supported layouts:
    /// - a single bare digest (typical `<asset>.sha256` file)
    /// - `sha256sum` output: `<hex>  <name>` or `<hex> *<name>`
    /// - reversed: `<name>  <hex>`
    /// - BSD: `SHA256 (<name>) = <hex>`
    pub fn parse(text: &str) -> Self {
        let mut manifest = Self::default();
        let text = text.trim();

        // Case 1: The entire file is just a digest
        if let Ok(d) = Sha256Digest::new(text) {
            manifest.bare = Some(d);
            return manifest;
        }

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((name, digest)) = parse_bsd_line(line).or_else(|| parse_pair_line(line)) {
                manifest.entries.insert(name, digest);
            } else if let Ok(d) = Sha256Digest::new(line) {
                // Single word line - the hash for the requested asset
                manifest.bare.get_or_insert(d);
            }
        }
        manifest
    }

    /// Parse raw bytes fetched from a release.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::NotText`] if the bytes are not UTF-8.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, ChecksumError> {
        std::str::from_utf8(bytes)
            .map(Self::parse)
            .map_err(|_| ChecksumError::NotText)
    }

    /// Add or replace the digest for `name`.
    pub fn insert(&mut self, name: impl Into<String>, digest: Sha256Digest) {
        self.entries.insert(name.into(), digest);
    }

    /// Expected digest for `asset_name`: exact name, then path suffix, then a
    /// bare single-digest document.
    pub fn lookup(&self, asset_name: &str) -> Option<&Sha256Digest> {
        if let Some(d) = self.entries.get(asset_name) {
            return Some(d);
        }
        self.entries
            .iter()
            .find(|(name, _)| {
                name.rsplit('/').next() == Some(asset_name)
                    || name.ends_with(&format!("/{asset_name}"))
            })
            .map(|(_, d)| d)
            .or(self.bare.as_ref())
    }

    /// Whether nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.bare.is_none()
    }

    /// Number of named entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn parse_bsd_line(line: &str) -> Option<(String, Sha256Digest)> {
    let rest = line.strip_prefix("SHA256 (")?;
    let (name, hex) = rest.split_once(") = ")?;
    Some((name.to_string(), Sha256Digest::new(hex.trim()).ok()?))
}

fn parse_pair_line(line: &str) -> Option<(String, Sha256Digest)> {
    // `<hex> <name>` first, then the reversed `<name> <hex>` layout. The
    // name is the rest of the line and may contain spaces.
    let (head, rest) = line.split_once(char::is_whitespace)?;
    if let Ok(d) = Sha256Digest::new(head.trim_end_matches(':')) {
        return named(rest.trim().trim_start_matches('*'), d);
    }
    let (rest, tail) = line.rsplit_once(char::is_whitespace)?;
    let d = Sha256Digest::new(tail).ok()?;
    named(rest.trim().trim_end_matches(':'), d)
}

fn named(name: &str, digest: Sha256Digest) -> Option<(String, Sha256Digest)> {
    (!name.is_empty()).then(|| (name.to_string(), digest))
}

/// Find the sidecar most likely to hold the digest of `selected`.
///
/// A dedicated `<selected>.sha256` file wins over an aggregate list.
pub fn locate_checksum_asset<'a>(
    sidecars: &'a [ReleaseAsset],
    selected: &str,
) -> Option<&'a ReleaseAsset> {
    let dedicated = [
        format!("{selected}.sha256"),
        format!("{selected}.sha256sum"),
    ];
    sidecars
        .iter()
        .find(|a| dedicated.iter().any(|d| a.name.eq_ignore_ascii_case(d)))
        .or_else(|| {
            sidecars.iter().find(|a| {
                let lower = a.name.to_lowercase();
                lower.contains("checksums") || lower.starts_with("sha256sums")
            })
        })
}
