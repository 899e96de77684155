//! End-to-end resolution: release assets in, [`PackageDescriptor`] out.
//!
//! ```text
//! assets --split--> installable --classify--> filter --select--> fetch
//!        --verify--> list entries --detect--> PackageDescriptor
//! ```
//!
//! Each stage consumes only the previous stage's output. Asset, network and
//! archive failures abort the run; detection misses leave `None` fields.

use std::fmt;
use std::sync::Arc;

use brewgen_schema::{
    Arch, ClassifiedAsset, PackageDescriptor, Platform, Release, ReleaseAsset, Sha256Digest,
    classify,
};
use tracing::{debug, info, warn};

use crate::checksum::{ChecksumManifest, locate_checksum_asset};
use crate::detect::{detect_binaries, detect_desktop_file, detect_icon, select_best_binary};
use crate::error::{Error, Result};
use crate::io::download::{ContentSource, Fetched};
use crate::io::inspect::{Inspection, list_entries};
use crate::reporter::Reporter;
use crate::select::{filter_target, select_best, split_sidecars};

/// Per-run knobs. Everything environment-derived is resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Platform to resolve for.
    pub platform: Platform,
    /// Architecture to prefer.
    pub arch: Arch,
    /// Package name used to pick the install target binary.
    pub package_name: String,
    /// Cross-check the download against an upstream checksum sidecar.
    pub verify_checksums: bool,
}

impl PipelineOptions {
    /// Options for `package_name` on the host platform and architecture.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            platform: Platform::current(),
            arch: Arch::current(),
            package_name: package_name.into(),
            verify_checksums: true,
        }
    }

    /// Override the target platform and architecture.
    pub fn with_target(mut self, platform: Platform, arch: Arch) -> Self {
        self.platform = platform;
        self.arch = arch;
        self
    }
}

/// Outcome of the pure selection stages.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Every installable asset, classified, in release order.
    pub classified: Vec<ClassifiedAsset>,
    /// The chosen asset.
    pub selected: ClassifiedAsset,
    /// Checksum and signature files set aside before classification.
    pub sidecars: Vec<ReleaseAsset>,
}

/// Split, classify, filter and select. No I/O.
///
/// # Errors
///
/// Returns [`Error::NoCandidate`] when nothing survives the platform filter.
pub fn select_asset(
    assets: Vec<ReleaseAsset>,
    platform: Platform,
    arch: Arch,
) -> Result<Selection> {
    let (installable, sidecars) = split_sidecars(assets);
    let classified: Vec<ClassifiedAsset> = installable.into_iter().map(classify).collect();
    let considered = classified.len();

    let candidates = filter_target(platform, classified.clone());
    if candidates.is_empty() {
        return Err(Error::NoCandidate {
            platform,
            arch,
            considered,
        });
    }

    let selected = select_best(&candidates, platform, arch)?;
    debug!(
        asset = selected.name(),
        format = %selected.format,
        arch = %selected.arch,
        candidates = candidates.len(),
        "selected asset"
    );
    Ok(Selection {
        classified,
        selected,
        sidecars,
    })
}

/// Inspect downloaded bytes and run the detectors.
///
/// `sha256` must be the digest of exactly `bytes`.
///
/// # Errors
///
/// Returns [`Error::ArchiveParse`] if a decoded format turns out to be corrupt.
pub fn describe_archive(
    selected: ClassifiedAsset,
    bytes: &[u8],
    sha256: Sha256Digest,
    package_name: &str,
    reporter: &dyn Reporter,
) -> Result<PackageDescriptor> {
    let inspection = list_entries(bytes, selected.format)?;

    let (root_dir, binary_path, desktop_file_path, icon_path) = match &inspection {
        Inspection::Unsupported(format) => {
            warn!(
                asset = selected.name(),
                %format,
                "archive inspection unsupported; skipping detection"
            );
            reporter.warning(&format!(
                "{} is a {format} package; binary and desktop detection skipped",
                selected.name()
            ));
            (None, None, None, None)
        }
        Inspection::Listed { entries, root_dir } => {
            let candidates = detect_binaries(entries);
            let binary = select_best_binary(&candidates, package_name)
                .map(|e| e.path.clone());
            if binary.is_none() {
                warn!(
                    asset = selected.name(),
                    package = package_name,
                    "no binary detected"
                );
                reporter.warning(&format!(
                    "No binary found for {package_name} in {}",
                    selected.name()
                ));
            }
            (
                root_dir.clone(),
                binary,
                detect_desktop_file(entries).map(|e| e.path.clone()),
                detect_icon(entries).map(|e| e.path.clone()),
            )
        }
    };

    info!(
        asset = selected.name(),
        entries = inspection.entries().len(),
        ?root_dir,
        ?binary_path,
        "inspected archive"
    );

    Ok(PackageDescriptor {
        selected_asset: selected,
        sha256,
        root_dir,
        binary_path,
        desktop_file_path,
        icon_path,
    })
}

/// Compare `fetched` against `manifest`. A missing entry only warns.
///
/// # Errors
///
/// Returns [`Error::ChecksumMismatch`] when the manifest disagrees.
pub fn verify_checksum(
    asset: &ClassifiedAsset,
    fetched: &Sha256Digest,
    manifest: &ChecksumManifest,
    reporter: &dyn Reporter,
) -> Result<()> {
    match manifest.lookup(asset.name()) {
        Some(expected) if expected == fetched => {
            debug!(asset = asset.name(), "checksum verified");
            reporter.info(&format!("Checksum verified for {}", asset.name()));
            Ok(())
        }
        Some(expected) => Err(Error::ChecksumMismatch {
            asset: asset.name().to_string(),
            expected: expected.to_string(),
            actual: fetched.to_string(),
        }),
        None => {
            warn!(asset = asset.name(), "no upstream checksum entry");
            reporter.warning(&format!("No upstream checksum listed for {}", asset.name()));
            Ok(())
        }
    }
}

/// Runs the stages in order against injected fetcher and reporter.
#[derive(Clone)]
pub struct Pipeline {
    options: PipelineOptions,
    fetcher: Arc<dyn ContentSource>,
    reporter: Arc<dyn Reporter>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Assemble a pipeline.
    pub fn new(
        options: PipelineOptions,
        fetcher: Arc<dyn ContentSource>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            options,
            fetcher,
            reporter,
        }
    }

    /// Options this pipeline runs with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Resolve `release` to a descriptor, discovering any checksum sidecar
    /// among its assets.
    ///
    /// # Errors
    ///
    /// Any of the fatal [`Error`] kinds.
    pub async fn run(&self, release: &Release) -> Result<PackageDescriptor> {
        self.run_with_manifest(release, None).await
    }

    /// Like [`Pipeline::run`], but with an already-parsed checksum manifest
    /// that takes the place of sidecar discovery.
    ///
    /// # Errors
    ///
    /// Any of the fatal [`Error`] kinds.
    pub async fn run_with_manifest(
        &self,
        release: &Release,
        manifest: Option<&ChecksumManifest>,
    ) -> Result<PackageDescriptor> {
        let opts = &self.options;
        let reporter = self.reporter.as_ref();
        info!(
            tag = %release.tag,
            assets = release.assets.len(),
            platform = %opts.platform,
            arch = %opts.arch,
            "resolving release"
        );

        reporter.section("Selecting");
        let selection = select_asset(release.assets.clone(), opts.platform, opts.arch)?;
        reporter.selected(&selection.selected);

        reporter.section("Downloading");
        let fetched = self
            .fetcher
            .fetch(selection.selected.download_url(), reporter)
            .await?;

        if opts.verify_checksums {
            self.verify(&selection, &fetched, manifest).await?;
        }

        reporter.section("Inspecting");
        describe_archive(
            selection.selected,
            &fetched.bytes,
            fetched.sha256,
            &opts.package_name,
            reporter,
        )
    }

    async fn verify(
        &self,
        selection: &Selection,
        fetched: &Fetched,
        explicit: Option<&ChecksumManifest>,
    ) -> Result<()> {
        let reporter = self.reporter.as_ref();
        let selected = &selection.selected;

        let discovered;
        let manifest = if let Some(m) = explicit {
            m
        } else {
            let Some(sidecar) = locate_checksum_asset(&selection.sidecars, selected.name()) else {
                debug!(asset = selected.name(), "no checksum sidecar published");
                return Ok(());
            };
            debug!(sidecar = %sidecar.name, "fetching checksum sidecar");
            let raw = self.fetcher.fetch(&sidecar.download_url, reporter).await?;
            discovered = ChecksumManifest::parse_bytes(&raw.bytes)?;
            &discovered
        };

        verify_checksum(selected, &fetched.sha256, manifest, reporter)
    }
}
