//! Resolve command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use brewgen_core::{
    ChecksumManifest, HttpFetcher, JsonReleaseFile, Pipeline, PipelineOptions, ReleaseSource,
    Reporter,
};
use tracing::info;

use crate::TargetArgs;
use crate::config::Settings;

/// Flags of `brewgen resolve`.
#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub release: PathBuf,
    pub name: String,
    pub target: TargetArgs,
    pub no_verify: bool,
    pub checksums: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub max_bytes: Option<u64>,
}

/// Run the pipeline and print the descriptor as pretty JSON.
pub async fn resolve(
    args: &ResolveArgs,
    settings: &Settings,
    reporter: Arc<dyn Reporter>,
) -> Result<()> {
    let release = JsonReleaseFile::new(&args.release).fetch_release().await?;
    info!(
        tag = %release.tag,
        assets = release.assets.len(),
        "release loaded"
    );

    let options = PipelineOptions {
        platform: settings.platform(args.target.platform),
        arch: settings.arch(args.target.arch),
        package_name: args.name.clone(),
        verify_checksums: settings.verify_checksums(args.no_verify),
    };
    let fetcher = HttpFetcher::new(&settings.fetch_config(args.timeout_secs, args.max_bytes))
        .context("Failed to initialise HTTP client")?;
    let pipeline = Pipeline::new(options, Arc::new(fetcher), reporter);

    let manifest = args.checksums.as_deref().map(load_manifest).transpose()?;
    let descriptor = pipeline
        .run_with_manifest(&release, manifest.as_ref())
        .await
        .with_context(|| format!("Failed to resolve {} {}", args.name, release.tag))?;

    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

fn load_manifest(path: &Path) -> Result<ChecksumManifest> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read checksum file {}", path.display()))?;
    let manifest = ChecksumManifest::parse_bytes(&raw)
        .with_context(|| format!("Invalid checksum file {}", path.display()))?;
    if manifest.is_empty() {
        bail!("No checksums found in {}", path.display());
    }
    Ok(manifest)
}
