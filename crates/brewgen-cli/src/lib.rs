//! brewgen - resolve a release into a package descriptor
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Picks the release asset that best fits a target platform, downloads and
//! hashes it, and inspects the archive in memory to find what a Homebrew
//! cask or formula needs: the binary, an optional desktop entry and icon,
//! and the archive's root directory.
//!
//! # Configuration
//!
//! Values are layered, last wins:
//!
//! ```text
//! built-in defaults
//!   <- config.toml   (--config, $BREWGEN_CONFIG, or <config_dir>/brewgen/config.toml)
//!   <- flags / BREWGEN_* environment variables
//! ```

pub mod cmd;
pub mod config;
pub mod ui;

use brewgen_schema::{Arch, Platform};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "brewgen")]
#[command(author, version, about = "Release assets to package descriptors")]
pub struct Cli {
    /// Enable debug logging for brewgen crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (TOML)
    #[arg(long, global = true, env = "BREWGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Target selection shared by `resolve` and `classify`.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Target platform (linux, macos, windows). Defaults to the host.
    #[arg(long, env = "BREWGEN_PLATFORM")]
    pub platform: Option<Platform>,
    /// Target architecture (x86_64, arm64). Defaults to the host.
    #[arg(long, env = "BREWGEN_ARCH")]
    pub arch: Option<Arch>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a release document into a package descriptor (JSON on stdout)
    Resolve {
        /// Release document in GitHub release JSON shape
        #[arg(long, short = 'r')]
        release: PathBuf,
        /// Package name used to pick the binary
        #[arg(long, short = 'n')]
        name: String,
        #[command(flatten)]
        target: TargetArgs,
        /// Skip the upstream checksum cross-check
        #[arg(long, env = "BREWGEN_NO_VERIFY")]
        no_verify: bool,
        /// Local checksum file to verify against instead of release sidecars
        #[arg(long)]
        checksums: Option<PathBuf>,
        /// Download timeout in seconds
        #[arg(long, env = "BREWGEN_TIMEOUT_SECS")]
        timeout_secs: Option<u64>,
        /// Refuse downloads larger than this many bytes
        #[arg(long, env = "BREWGEN_MAX_BYTES")]
        max_bytes: Option<u64>,
    },
    /// Show how asset file names classify and which one would be selected
    Classify {
        /// Asset file names
        #[arg(required = true)]
        names: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Hash and inspect a local archive
    Inspect {
        /// Archive path
        path: PathBuf,
        /// Package name used to pick the binary (defaults to the file name's first word)
        #[arg(long, short = 'n')]
        name: Option<String>,
        /// Print every archive entry
        #[arg(long)]
        entries: bool,
        /// Print the descriptor as JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Write the content of one entry to stdout
        #[arg(long, value_name = "ENTRY", conflicts_with_all = ["entries", "json"])]
        read: Option<String>,
    },
}
