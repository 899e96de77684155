//! Classification table.

use brewgen_schema::{ClassifiedAsset, ReleaseAsset};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

/// Marker for the asset that would be selected.
pub const SELECTED_MARK: &str = "*";

/// One row per installable asset, then one per sidecar.
///
/// The row at `selected` (an index into `assets`) is marked.
pub fn asset_table(
    assets: &[ClassifiedAsset],
    selected: Option<usize>,
    sidecars: &[ReleaseAsset],
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Asset", "Platform", "Arch", "Format", "Priority"]);

    for (i, asset) in assets.iter().enumerate() {
        let mark = if selected == Some(i) { SELECTED_MARK } else { "" };
        table.add_row(vec![
            mark.to_string(),
            asset.name().to_string(),
            asset.platform.to_string(),
            asset.arch.to_string(),
            asset.format.to_string(),
            asset.priority.to_string(),
        ]);
    }

    for sidecar in sidecars {
        table.add_row(vec![
            String::new(),
            sidecar.name.clone(),
            "-".to_string(),
            "-".to_string(),
            "sidecar".to_string(),
            "-".to_string(),
        ]);
    }

    table
}
