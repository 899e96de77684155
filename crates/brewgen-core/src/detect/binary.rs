//! Install-target executable detection.
//!
//! Works purely on entry metadata. Misses are not errors: an empty candidate
//! list or `None` tells the caller to carry on without a binary path.

use brewgen_schema::ArchiveEntry;
use tracing::debug;

/// File-name prefixes of documentation and legal files.
const NON_BINARY_PREFIXES: &[&str] = &[
    "license",
    "licence",
    "readme",
    "changelog",
    "copying",
    "notice",
];

/// File-name suffixes of files that are never the install target.
const NON_BINARY_SUFFIXES: &[&str] = &[
    ".txt", ".md", ".json", ".yml", ".yaml", ".toml", ".desktop", ".png", ".svg", ".xpm", ".ico",
    ".1", ".5", ".8", ".service", ".html", ".bash", ".zsh", ".fish", ".ps1",
];

/// Directory segments holding shell completions or manual pages.
const NON_BINARY_DIRS: &[&str] = &[
    "completion",
    "completions",
    "autocomplete",
    "bash-completion",
    "bash_completion.d",
    "zsh",
    "site-functions",
    "fish",
    "vendor_completions.d",
    "man",
    "man1",
    "man5",
    "man8",
];

fn is_non_binary(entry: &ArchiveEntry) -> bool {
    let name = entry.file_name().to_lowercase();
    if NON_BINARY_PREFIXES.iter().any(|p| name.starts_with(p))
        || NON_BINARY_SUFFIXES.iter().any(|s| name.ends_with(s))
    {
        return true;
    }

    // zsh completion functions are conventionally named `_tool`.
    if name.starts_with('_') {
        return true;
    }

    let lower = entry.path.to_lowercase();
    let mut dirs = lower.split('/').rev().skip(1);
    dirs.any(|seg| NON_BINARY_DIRS.contains(&seg))
}

/// Whether `path` lives in a `bin/` directory (`bin/`, `usr/bin/`, `usr/local/bin/`, ...).
fn in_bin_dir(path: &str) -> bool {
    path.split('/').rev().skip(1).any(|seg| seg == "bin")
}

/// Narrow archive entries down to plausible executables.
///
/// Directories and known non-binary files are removed. If any survivor lives
/// in a `bin/` directory, every survivor outside one is dropped.
pub fn detect_binaries(entries: &[ArchiveEntry]) -> Vec<ArchiveEntry> {
    let candidates: Vec<&ArchiveEntry> = entries
        .iter()
        .filter(|e| !e.is_dir)
        .filter(|e| !is_non_binary(e))
        .collect();

    let narrowed: Vec<ArchiveEntry> = if candidates.iter().any(|e| in_bin_dir(&e.path)) {
        candidates
            .into_iter()
            .filter(|e| in_bin_dir(&e.path))
            .cloned()
            .collect()
    } else {
        candidates.into_iter().cloned().collect()
    };

    debug!(count = narrowed.len(), "binary candidates");
    narrowed
}

/// Pick the install target for `package_name`.
///
/// In order: exact file-name match (case-insensitive); file name containing
/// the package name, closest in length first; shortest path. Remaining ties
/// go to the first candidate.
pub fn select_best_binary<'a>(
    candidates: &'a [ArchiveEntry],
    package_name: &str,
) -> Option<&'a ArchiveEntry> {
    let wanted = package_name.to_lowercase();

    let exact = candidates
        .iter()
        .filter(|e| e.file_name().to_lowercase() == wanted)
        .min_by_key(|e| e.path.len());
    if exact.is_some() {
        return exact;
    }

    if !wanted.is_empty() {
        let partial = candidates
            .iter()
            .filter(|e| e.file_name().to_lowercase().contains(&wanted))
            .min_by_key(|e| {
                let extra = e.file_name().len().saturating_sub(wanted.len());
                (extra, e.path.len())
            });
        if partial.is_some() {
            return partial;
        }
    }

    candidates.iter().min_by_key(|e| e.path.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<ArchiveEntry> {
        paths.iter().map(|p| ArchiveEntry::file(*p, 1)).collect()
    }

    fn detected(paths: &[&str]) -> Vec<String> {
        detect_binaries(&files(paths))
            .into_iter()
            .map(|e| e.path)
            .collect()
    }

    #[test]
    fn test_binary_narrowing() {
        assert_eq!(
            detected(&["bin/app", "LICENSE", "README.md", "share/doc/app.1"]),
            ["bin/app"]
        );
    }

    #[test]
    fn test_directories_excluded() {
        let mut entries = files(&["tool"]);
        entries.insert(0, ArchiveEntry::dir("bin"));
        let found = detect_binaries(&entries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "tool");
    }

    #[test]
    fn test_non_binary_patterns() {
        let found = detected(&[
            "pkg/LICENSE-MIT",
            "pkg/readme",
            "pkg/CHANGELOG.md",
            "pkg/notes.txt",
            "pkg/config.json",
            "pkg/ci.yml",
            "pkg/ci.yaml",
            "pkg/app.desktop",
            "pkg/icon.png",
            "pkg/icon.svg",
            "pkg/app.service",
            "pkg/completions/app.bash",
            "pkg/completions/_app",
            "pkg/autocomplete/app",
            "pkg/share/zsh/site-functions/app",
            "pkg/share/man/man1/app",
            "pkg/app",
        ]);
        assert_eq!(found, ["pkg/app"]);
    }

    #[test]
    fn test_bin_narrowing_is_hard() {
        let found = detected(&[
            "tool/helper",
            "tool/usr/local/bin/tool",
            "tool/usr/bin/tool2",
        ]);
        assert_eq!(found, ["tool/usr/local/bin/tool", "tool/usr/bin/tool2"]);
    }

    #[test]
    fn test_no_bin_dir_keeps_everything() {
        let found = detected(&["tool-1.0/tool", "tool-1.0/tool-helper"]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_bin_file_is_not_a_bin_dir() {
        // A file literally named `bin` does not trigger narrowing.
        let found = detected(&["pkg/bin", "pkg/tool"]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_exact_name_beats_substring() {
        let candidates = files(&["app-v1-linux/app-helper", "app-v1-linux/app"]);
        let best = select_best_binary(&candidates, "app").unwrap();
        assert_eq!(best.path, "app-v1-linux/app");
    }

    #[test]
    fn test_exact_name_is_case_insensitive() {
        let candidates = files(&["x/other", "x/MyTool"]);
        let best = select_best_binary(&candidates, "mytool").unwrap();
        assert_eq!(best.path, "x/MyTool");
    }

    #[test]
    fn test_substring_closest_length_wins() {
        let candidates = files(&["d/foo-cli-helper", "d/foo-cli", "d/bar"]);
        let best = select_best_binary(&candidates, "foo").unwrap();
        assert_eq!(best.path, "d/foo-cli");
    }

    #[test]
    fn test_shortest_path_fallback() {
        let candidates = files(&["a/b/c/zzz", "a/yyyy", "a/b/xx"]);
        let best = select_best_binary(&candidates, "tool").unwrap();
        assert_eq!(best.path, "a/yyyy");
    }

    #[test]
    fn test_empty_candidates_is_none() {
        assert!(select_best_binary(&[], "tool").is_none());
    }
}
