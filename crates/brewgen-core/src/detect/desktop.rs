//! Desktop-entry and icon detection.
//!
//! Desktop integration is optional; every function here returns `None` on a
//! miss instead of failing.

use std::sync::LazyLock;

use brewgen_schema::ArchiveEntry;
use regex::Regex;

static SIZE_HINT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").ok());

/// Icon formats in order of preference.
const ICON_EXTENSIONS: &[&str] = &[".svg", ".png", ".xpm"];

/// The `.desktop` file, shortest path first.
pub fn detect_desktop_file(entries: &[ArchiveEntry]) -> Option<&ArchiveEntry> {
    entries
        .iter()
        .filter(|e| !e.is_dir)
        .filter(|e| e.file_name().to_lowercase().ends_with(".desktop"))
        .min_by_key(|e| e.path.len())
}

/// Largest `WxH` dimension mentioned anywhere in `path`.
fn size_hint(path: &str) -> Option<u32> {
    SIZE_HINT
        .as_ref()?
        .captures_iter(path)
        .filter_map(|caps| {
            let w = caps[1].parse::<u32>().ok()?;
            let h = caps[2].parse::<u32>().ok()?;
            Some(w.max(h))
        })
        .max()
}

fn icon_rank(entry: &ArchiveEntry) -> Option<usize> {
    let name = entry.file_name().to_lowercase();
    ICON_EXTENSIONS.iter().position(|ext| name.ends_with(ext))
}

/// The best icon: SVG over PNG over XPM, then the largest `WxH` hint in the
/// path, then the shortest path.
pub fn detect_icon(entries: &[ArchiveEntry]) -> Option<&ArchiveEntry> {
    entries
        .iter()
        .filter(|e| !e.is_dir)
        .filter_map(|e| icon_rank(e).map(|rank| (rank, e)))
        .min_by_key(|(rank, e)| {
            (
                *rank,
                std::cmp::Reverse(size_hint(&e.path).unwrap_or(0)),
                e.path.len(),
            )
        })
        .map(|(_, e)| e)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<ArchiveEntry> {
        paths.iter().map(|p| ArchiveEntry::file(*p, 1)).collect()
    }

    #[test]
    fn test_desktop_file_shortest_path() {
        let entries = files(&[
            "app/share/applications/app.desktop",
            "app/bin/app",
            "app/App.DESKTOP",
        ]);
        let found = detect_desktop_file(&entries).unwrap();
        assert_eq!(found.path, "app/App.DESKTOP");
    }

    #[test]
    fn test_graceful_miss() {
        let entries = files(&["tool/bin/tool", "tool/README.md"]);
        assert!(detect_desktop_file(&entries).is_none());
        assert!(detect_icon(&entries).is_none());
        assert!(detect_icon(&[]).is_none());
    }

    #[test]
    fn test_icon_size_preference() {
        let entries = files(&["icons/128x128/app.png", "icons/512x512/app.png"]);
        assert_eq!(detect_icon(&entries).unwrap().path, "icons/512x512/app.png");
    }

    #[test]
    fn test_icon_extension_preference() {
        let entries = files(&[
            "share/icons/1024x1024/app.png",
            "share/pixmaps/app.xpm",
            "share/icons/scalable/app.svg",
        ]);
        let icon = detect_icon(&entries).unwrap();
        assert_eq!(icon.path, "share/icons/scalable/app.svg");

        let no_svg = files(&["share/pixmaps/app.xpm", "app.png"]);
        assert_eq!(detect_icon(&no_svg).unwrap().path, "app.png");
    }

    #[test]
    fn test_icon_shortest_path_without_hint() {
        let entries = files(&["a/b/c/icon.png", "a/icon.png"]);
        assert_eq!(detect_icon(&entries).unwrap().path, "a/icon.png");
    }

    #[test]
    fn test_size_hint_parsing() {
        assert_eq!(size_hint("icons/hicolor/256x256/apps/a.png"), Some(256));
        assert_eq!(size_hint("icon-32x48@2x.png"), Some(48));
        assert_eq!(size_hint("icons/16x16/a_64x64.png"), Some(64));
        assert_eq!(size_hint("icon.png"), None);
    }
}
