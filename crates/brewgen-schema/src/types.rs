//! Core data types flowing through the resolution pipeline.

use serde::{Deserialize, Serialize};

use crate::arch::{Arch, Platform};
use crate::classify::Format;
use crate::hash::Sha256Digest;

/// One downloadable file attached to a release.
///
/// Accepts both the short field names and the GitHub release API names
/// (`browser_download_url`, `size`) when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// File name as published (e.g. `tool-1.0-linux-x64.tar.gz`).
    pub name: String,
    /// Direct download URL.
    #[serde(alias = "browser_download_url")]
    pub download_url: String,
    /// Size in bytes as reported by the host (0 when unknown).
    #[serde(alias = "size", default)]
    pub size_bytes: u64,
}

impl ReleaseAsset {
    /// Create a new asset record.
    pub fn new(name: impl Into<String>, download_url: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
            size_bytes,
        }
    }
}

/// A release plus its assets, as supplied by the release-metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version tag string (e.g. `v1.2.3`).
    #[serde(alias = "tag_name")]
    pub tag: String,
    /// Assets attached to the release, in publication order.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Tag with a single leading `v` removed.
    pub fn version(&self) -> &str {
        self.tag.strip_prefix('v').unwrap_or(&self.tag)
    }
}

/// A [`ReleaseAsset`] labelled by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedAsset {
    /// The underlying release asset.
    #[serde(flatten)]
    pub asset: ReleaseAsset,
    /// Platform derived from the name.
    pub platform: Platform,
    /// Architecture derived from the name.
    pub arch: Arch,
    /// Container format derived from the extension.
    pub format: Format,
    /// Selection priority of `format` (lower wins).
    pub priority: u8,
}

impl ClassifiedAsset {
    /// Asset file name.
    pub fn name(&self) -> &str {
        &self.asset.name
    }

    /// Asset download URL.
    pub fn download_url(&self) -> &str {
        &self.asset.download_url
    }
}

/// Metadata for a single member of an archive. No content is retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Normalised relative path (no leading `./` or `/`, no trailing `/`).
    pub path: String,
    /// Uncompressed size in bytes.
    pub size_bytes: u64,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl ArchiveEntry {
    /// Create a regular-file entry.
    pub fn file(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            is_dir: false,
        }
    }

    /// Create a directory entry.
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size_bytes: 0,
            is_dir: true,
        }
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// First path segment.
    pub fn top_level(&self) -> &str {
        self.path.split('/').next().unwrap_or(&self.path)
    }
}

/// Terminal output of the pipeline, handed to the rendering stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Asset chosen for the target.
    pub selected_asset: ClassifiedAsset,
    /// Digest of the exact bytes that were inspected.
    pub sha256: Sha256Digest,
    /// Single top-level directory shared by every entry, if any.
    pub root_dir: Option<String>,
    /// Path of the executable to install, if one was detected.
    pub binary_path: Option<String>,
    /// Path of the desktop-entry file, if any.
    pub desktop_file_path: Option<String>,
    /// Path of the preferred icon, if any.
    pub icon_path: Option<String>,
}
