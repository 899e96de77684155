//! Release asset resolution and archive inspection.
//!
//! Picks the best release asset for a target, downloads and hashes it,
//! lists the archive in memory and detects the binary, desktop entry and
//! icon to put in a package descriptor. See [`pipeline`] for the stage order.

pub mod checksum;
pub mod detect;
pub mod error;
pub mod io;
pub mod paths;
pub mod pipeline;
pub mod reporter;
pub mod select;
pub mod source;

pub use checksum::ChecksumManifest;
pub use error::{Error, Result};
pub use io::download::{ContentSource, FetchConfig, Fetched, HttpFetcher};
pub use io::inspect::{Inspection, list_entries, read_entry};
pub use paths::filename_from_url;
pub use pipeline::{Pipeline, PipelineOptions, Selection, describe_archive, select_asset};
pub use reporter::{NullReporter, Reporter};
pub use source::{JsonReleaseFile, ReleaseSource, SourceError, StaticRelease};

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("brewgen/", env!("CARGO_PKG_VERSION"));
