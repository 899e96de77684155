//! Classify command

use anyhow::Result;
use brewgen_core::select::split_sidecars;
use brewgen_core::select_asset;
use brewgen_schema::{ClassifiedAsset, ReleaseAsset, classify};
use crossterm::style::Stylize;

use crate::TargetArgs;
use crate::config::Settings;
use crate::ui::asset_table;

/// Print how each name classifies and mark the one that would be selected.
pub fn classify_names(names: &[String], target: &TargetArgs, settings: &Settings) -> Result<()> {
    let platform = settings.platform(target.platform);
    let arch = settings.arch(target.arch);

    let assets: Vec<ReleaseAsset> = names
        .iter()
        .map(|n| ReleaseAsset::new(n.as_str(), "", 0))
        .collect();

    let (installable, sidecars) = split_sidecars(assets.clone());
    let classified: Vec<ClassifiedAsset> = installable.into_iter().map(classify).collect();

    let selection = select_asset(assets, platform, arch);
    let selected_idx = selection.as_ref().ok().and_then(|s| {
        classified
            .iter()
            .position(|a| a.name() == s.selected.name())
    });

    println!("{}", asset_table(&classified, selected_idx, &sidecars));
    println!();
    match selection {
        Ok(s) => println!(
            "  {} {} for {platform}/{arch}",
            "selected".green(),
            s.selected.name().white().bold()
        ),
        Err(e) => println!("  {} {e}", "none:".yellow()),
    }
    Ok(())
}
