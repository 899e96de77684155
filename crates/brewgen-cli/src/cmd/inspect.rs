//! Inspect command

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use brewgen_core::{Inspection, Reporter, describe_archive, list_entries, read_entry};
use brewgen_schema::{PackageDescriptor, ReleaseAsset, Sha256Digest, classify};
use crossterm::style::Stylize;

use crate::config::Settings;
use crate::ui::format_size;

/// Flags of `brewgen inspect`.
#[derive(Debug, Clone)]
pub struct InspectArgs<'a> {
    pub path: &'a Path,
    pub name: Option<&'a str>,
    pub entries: bool,
    pub json: bool,
    pub read: Option<&'a str>,
}

/// Hash and inspect a local archive.
pub fn inspect(
    args: &InspectArgs<'_>,
    settings: &Settings,
    reporter: &dyn Reporter,
) -> Result<()> {
    let limit = settings.fetch_config(None, None).max_bytes;
    let file_name = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", args.path.display()))?;

    let size = std::fs::metadata(args.path)
        .with_context(|| format!("Failed to stat {}", args.path.display()))?
        .len();
    if size > limit {
        bail!(
            "{file_name} is {} which exceeds the {} limit",
            format_size(size),
            format_size(limit)
        );
    }
    let bytes = std::fs::read(args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let asset = classify(ReleaseAsset::new(
        file_name,
        args.path.display().to_string(),
        bytes.len() as u64,
    ));

    if let Some(entry) = args.read {
        let content = read_entry(&bytes, asset.format, entry, limit)?
            .with_context(|| format!("No file entry {entry} in {file_name}"))?;
        std::io::stdout().write_all(&content)?;
        return Ok(());
    }

    let name = args
        .name
        .map_or_else(|| guess_package_name(file_name), str::to_string);
    let sha256 = Sha256Digest::compute(&bytes);
    let descriptor = describe_archive(asset, &bytes, sha256, &name, reporter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
    } else {
        print_summary(&descriptor, bytes.len() as u64);
    }

    if args.entries
        && let Inspection::Listed { entries, .. } =
            list_entries(&bytes, descriptor.selected_asset.format)?
    {
        println!();
        for e in &entries {
            let size = if e.is_dir {
                "-".to_string()
            } else {
                format_size(e.size_bytes)
            };
            println!("  {size:>10}  {}", e.path);
        }
    }
    Ok(())
}

fn print_summary(d: &PackageDescriptor, size: u64) {
    let lw = 10;
    let asset = &d.selected_asset;
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".dark_grey().to_string());

    println!();
    println!(
        "  {} {}",
        asset.name().white().bold(),
        format_size(size).dark_grey()
    );
    println!();
    println!("  {:<lw$}{}", "platform", asset.platform);
    println!("  {:<lw$}{}", "arch", asset.arch);
    println!("  {:<lw$}{}", "format", asset.format);
    println!("  {:<lw$}{}", "sha256", d.sha256);
    println!("  {:<lw$}{}", "root", show(&d.root_dir));
    println!("  {:<lw$}{}", "binary", show(&d.binary_path));
    println!("  {:<lw$}{}", "desktop", show(&d.desktop_file_path));
    println!("  {:<lw$}{}", "icon", show(&d.icon_path));
}

/// Leading word of an archive name: `ripgrep-14.1.0-x86_64.tar.gz` -> `ripgrep`.
pub fn guess_package_name(file_name: &str) -> String {
    file_name
        .split(['-', '_', '.'])
        .next()
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_package_name() {
        assert_eq!(
            guess_package_name("ripgrep-14.1.0-x86_64-unknown-linux-musl.tar.gz"),
            "ripgrep"
        );
        assert_eq!(guess_package_name("tool_1.0_amd64.deb"), "tool");
        assert_eq!(guess_package_name("tool.tar.xz"), "tool");
    }
}
