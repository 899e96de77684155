//! In-memory archive inspection
//!
//! Lists tar.gz, tar.xz and tar.bz2 archives by streaming the decompressor
//! straight into the tar reader. Nothing is extracted to disk; entries carry
//! metadata only. Other container formats are reported as unsupported
//! rather than failing.

use std::io::{self, Read};
use std::ops::ControlFlow;

use brewgen_schema::{ArchiveEntry, Format};
use thiserror::Error;
use tracing::debug;

/// Upper bound on entries listed from one archive.
pub const MAX_ENTRIES: usize = 100_000;

/// A supported archive failed to decode.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Corrupt compression stream or tar headers.
    #[error("failed to decode {format} archive: {source}")]
    Decode {
        /// Format the bytes were decoded as.
        format: Format,
        /// Underlying decoder or tar error.
        #[source]
        source: io::Error,
    },

    /// The archive lists more entries than [`MAX_ENTRIES`].
    #[error("archive has more than {MAX_ENTRIES} entries")]
    TooManyEntries,

    /// A single entry is larger than the caller's read limit.
    #[error("entry {path} is {size} bytes, above the {limit} byte limit")]
    EntryTooLarge {
        /// Entry path.
        path: String,
        /// Declared size.
        size: u64,
        /// Caller's limit.
        limit: u64,
    },
}

/// Result of inspecting an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    /// The archive was decoded.
    Listed {
        /// Entries in archive order.
        entries: Vec<ArchiveEntry>,
        /// Single top-level directory shared by every entry.
        root_dir: Option<String>,
    },
    /// This format is not decoded; detection should be skipped.
    Unsupported(Format),
}

impl Inspection {
    /// Listed entries (empty when unsupported).
    pub fn entries(&self) -> &[ArchiveEntry] {
        match self {
            Self::Listed { entries, .. } => entries,
            Self::Unsupported(_) => &[],
        }
    }

    /// Detected root directory, if any.
    pub fn root_dir(&self) -> Option<&str> {
        match self {
            Self::Listed { root_dir, .. } => root_dir.as_deref(),
            Self::Unsupported(_) => None,
        }
    }

    /// Whether the archive was actually decoded.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Listed { .. })
    }
}

/// Wrap `bytes` in the streaming decompressor for `format`.
fn decoder(bytes: &[u8], format: Format) -> Option<Box<dyn Read + '_>> {
    match format {
        Format::TarGz => Some(Box::new(flate2::read::GzDecoder::new(bytes))),
        Format::TarXz => Some(Box::new(xz2::read::XzDecoder::new(bytes))),
        Format::TarBz2 => Some(Box::new(bzip2::read::BzDecoder::new(bytes))),
        Format::Zip | Format::Deb | Format::Rpm | Format::AppImage | Format::Other => None,
    }
}

/// Normalise an archive member path: drop leading `./` and `/`, trailing `/`.
///
/// Returns `None` for paths that name the archive root itself.
pub fn normalize_path(raw: &str) -> Option<String> {
    let mut p = raw.trim_end_matches('/');
    loop {
        if let Some(rest) = p.strip_prefix("./") {
            p = rest;
        } else if let Some(rest) = p.strip_prefix('/') {
            p = rest;
        } else {
            break;
        }
    }
    if p.is_empty() || p == "." {
        None
    } else {
        Some(p.to_string())
    }
}

/// Metadata of one tar member handed to a [`walk`] visitor.
struct Member {
    path: String,
    size: u64,
    is_dir: bool,
}

/// Drive the tar entry iterator over the decompressed stream.
///
/// The visitor gets each member's metadata and a reader over its content.
/// Returns `Ok(false)` without calling `visit` when `format` is not decoded here.
fn walk<F>(bytes: &[u8], format: Format, mut visit: F) -> Result<bool, ArchiveError>
where
    F: FnMut(Member, &mut dyn Read) -> Result<ControlFlow<()>, ArchiveError>,
{
    let Some(reader) = decoder(bytes, format) else {
        return Ok(false);
    };
    let decode = |source| ArchiveError::Decode { format, source };

    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries().map_err(decode)? {
        let mut entry = entry.map_err(decode)?;
        let entry_type = entry.header().entry_type();
        if matches!(
            entry_type,
            tar::EntryType::XGlobalHeader | tar::EntryType::XHeader
        ) {
            continue;
        }
        let raw = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let Some(path) = normalize_path(&raw) else {
            continue;
        };
        let member = Member {
            path,
            size: entry.size(),
            is_dir: entry_type.is_dir(),
        };
        if visit(member, &mut entry)?.is_break() {
            break;
        }
    }
    Ok(true)
}

/// List the entries of an archive without extracting anything.
///
/// # Errors
///
/// Returns [`ArchiveError`] if a supported format fails to decode or holds
/// more than [`MAX_ENTRIES`] entries.
pub fn list_entries(bytes: &[u8], format: Format) -> Result<Inspection, ArchiveError> {
    let mut entries = Vec::new();
    let supported = walk(bytes, format, |member, _| {
        if entries.len() >= MAX_ENTRIES {
            return Err(ArchiveError::TooManyEntries);
        }
        entries.push(ArchiveEntry {
            path: member.path,
            size_bytes: member.size,
            is_dir: member.is_dir,
        });
        Ok(ControlFlow::Continue(()))
    })?;

    if !supported {
        debug!(%format, "inspection unsupported");
        return Ok(Inspection::Unsupported(format));
    }

    let root_dir = detect_root_dir(&entries);
    debug!(
        %format,
        entries = entries.len(),
        ?root_dir,
        "listed archive"
    );
    Ok(Inspection::Listed { entries, root_dir })
}

/// Read the content of the single entry at `path` (normalised form).
///
/// Returns `Ok(None)` if the entry is absent, is a directory, or the format
/// is not decoded here.
///
/// # Errors
///
/// Returns [`ArchiveError`] on decode failure or if the entry is larger
/// than `limit` bytes.
pub fn read_entry(
    bytes: &[u8],
    format: Format,
    path: &str,
    limit: u64,
) -> Result<Option<Vec<u8>>, ArchiveError> {
    let mut found = None;
    walk(bytes, format, |member, content| {
        if member.path != path || member.is_dir {
            return Ok(ControlFlow::Continue(()));
        }
        if member.size > limit {
            return Err(ArchiveError::EntryTooLarge {
                path: member.path,
                size: member.size,
                limit,
            });
        }
        let mut buf = Vec::with_capacity(member.size as usize);
        content
            .read_to_end(&mut buf)
            .map_err(|source| ArchiveError::Decode { format, source })?;
        found = Some(buf);
        Ok(ControlFlow::Break(()))
    })?;
    Ok(found)
}

/// The single top-level directory shared by every entry, if there is one.
///
/// A top-level *file* disqualifies the archive: the shared segment must be a
/// directory that every other entry lives beneath.
pub fn detect_root_dir(entries: &[ArchiveEntry]) -> Option<String> {
    let first = entries.first()?.top_level();
    let shared = entries.iter().all(|e| {
        e.top_level() == first && (e.is_dir || e.path.len() > first.len())
    });
    shared.then(|| first.to_string())
}
