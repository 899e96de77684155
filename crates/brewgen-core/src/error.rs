//! Fatal error taxonomy of the resolution pipeline.
//!
//! Detection misses (no binary, no desktop file, no icon) are not errors;
//! they surface as `None` fields on the descriptor.

use brewgen_schema::{Arch, Platform};
use thiserror::Error;

use crate::checksum::ChecksumError;
use crate::io::download::DownloadError;
use crate::io::inspect::ArchiveError;

/// Errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum Error {
    /// Filtering and selection left no usable asset.
    #[error("No compatible asset for {platform}/{arch} among {considered} candidate(s)")]
    NoCandidate {
        /// Target platform.
        platform: Platform,
        /// Target architecture.
        arch: Arch,
        /// Installable assets classified before the platform filter. Zero
        /// when raised by [`select_best`](crate::select::select_best), which only
        /// sees the filtered list.
        considered: usize,
    },

    /// Fetching the selected asset failed.
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    /// The computed digest disagrees with the upstream checksum file.
    #[error("Checksum mismatch for {asset}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Asset file name.
        asset: String,
        /// Digest published upstream.
        expected: String,
        /// Digest computed over the downloaded bytes.
        actual: String,
    },

    /// A supported archive format failed to decode.
    #[error("Archive parse failed: {0}")]
    ArchiveParse(#[from] ArchiveError),

    /// The upstream checksum document could not be used.
    #[error("Checksum file error: {0}")]
    Checksum(#[from] ChecksumError),
}

/// Convenience alias for pipeline results.
pub type Result<T, E = Error> = std::result::Result<T, E>;
