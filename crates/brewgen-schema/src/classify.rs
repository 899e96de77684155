//! Filename-based classification of release assets.
//!
//! Vendors name their assets inconsistently (`darwin`/`macos`/`osx`,
//! `amd64`/`x86_64`, `.tgz`/`.tar.gz`), so each dimension is resolved by an
//! ordered rule table evaluated top to bottom; the first matching rule wins.
//! Classification is total: anything unrecognised degrades to
//! [`Platform::Unknown`], [`Arch::Unknown`] or [`Format::Other`].

use serde::{Deserialize, Serialize};

use crate::arch::{Arch, Platform};
use crate::types::{ClassifiedAsset, ReleaseAsset};

/// Container format of a release asset, keyed on its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Gzip-compressed tar archive (`.tar.gz`, `.tgz`).
    TarGz,
    /// XZ-compressed tar archive (`.tar.xz`, `.txz`).
    TarXz,
    /// Bzip2-compressed tar archive (`.tar.bz2`, `.tbz2`, `.tbz`).
    TarBz2,
    /// Zip archive (`.zip`).
    Zip,
    /// Debian package (`.deb`).
    Deb,
    /// RPM package (`.rpm`).
    Rpm,
    /// Self-mounting `AppImage` executable (`.appimage`).
    #[serde(rename = "appimage")]
    AppImage,
    /// Anything else, including bare compressed files and raw binaries.
    Other,
}

impl Format {
    /// Selection priority of this format; lower is better.
    ///
    /// Tarballs tie at the top, and the rest of the table is fixed so that
    /// the same candidate list always ranks the same way.
    pub fn priority(self) -> u8 {
        match self {
            Self::TarGz | Self::TarXz | Self::TarBz2 => 1,
            Self::Deb => 2,
            Self::Zip => 3,
            Self::Rpm | Self::AppImage => 4,
            Self::Other => 5,
        }
    }

    /// Whether this format is a compressed tarball.
    pub fn is_tarball(self) -> bool {
        matches!(self, Self::TarGz | Self::TarXz | Self::TarBz2)
    }

    /// Convert to string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TarGz => "tar_gz",
            Self::TarXz => "tar_xz",
            Self::TarBz2 => "tar_bz2",
            Self::Zip => "zip",
            Self::Deb => "deb",
            Self::Rpm => "rpm",
            Self::AppImage => "appimage",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One platform rule: any token substring or any extension suffix matches.
struct PlatformRule {
    tokens: &'static [&'static str],
    extensions: &'static [&'static str],
    platform: Platform,
}

impl PlatformRule {
    fn matches(&self, lower: &str) -> bool {
        self.tokens.iter().any(|t| lower.contains(t))
            || self.extensions.iter().any(|e| lower.ends_with(e))
    }
}

const PLATFORM_RULES: &[PlatformRule] = &[
    PlatformRule {
        tokens: &["darwin", "macos", "osx"],
        extensions: &[".dmg", ".pkg"],
        platform: Platform::MacOS,
    },
    PlatformRule {
        tokens: &["windows", "win32", "win64"],
        extensions: &[".exe", ".msi"],
        platform: Platform::Windows,
    },
    PlatformRule {
        tokens: &["linux"],
        extensions: &[".deb", ".rpm", ".appimage"],
        platform: Platform::Linux,
    },
];

const ARCH_RULES: &[(&[&str], Arch)] = &[
    (&["x86_64", "amd64", "x64"], Arch::X86_64),
    (&["aarch64", "arm64"], Arch::Arm64),
];

// Most specific suffix first so `.tar.gz` is never mistaken for a bare `.gz`.
const FORMAT_RULES: &[(&[&str], Format)] = &[
    (&[".tar.gz", ".tgz"], Format::TarGz),
    (&[".tar.xz", ".txz"], Format::TarXz),
    (&[".tar.bz2", ".tbz2", ".tbz"], Format::TarBz2),
    (&[".zip"], Format::Zip),
    (&[".deb"], Format::Deb),
    (&[".rpm"], Format::Rpm),
    (&[".appimage"], Format::AppImage),
];

/// The three labels derived from a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClass {
    /// Detected operating system.
    pub platform: Platform,
    /// Detected CPU architecture.
    pub arch: Arch,
    /// Detected container format.
    pub format: Format,
}

impl AssetClass {
    /// Classify a raw filename. Never fails.
    pub fn from_filename(filename: &str) -> Self {
        let f = filename.to_lowercase();

        let platform = PLATFORM_RULES
            .iter()
            .find(|rule| rule.matches(&f))
            .map_or(Platform::Unknown, |rule| rule.platform);

        let arch = ARCH_RULES
            .iter()
            .find(|(tokens, _)| tokens.iter().any(|t| f.contains(t)))
            .map_or(Arch::Unknown, |(_, arch)| *arch);

        let format = FORMAT_RULES
            .iter()
            .find(|(suffixes, _)| suffixes.iter().any(|s| f.ends_with(s)))
            .map_or(Format::Other, |(_, format)| *format);

        Self {
            platform,
            arch,
            format,
        }
    }
}

/// Classify a release asset by its name.
///
/// The priority is derived from the format here, once, so every later
/// stage sees the same ranking.
pub fn classify(asset: ReleaseAsset) -> ClassifiedAsset {
    let class = AssetClass::from_filename(&asset.name);
    ClassifiedAsset {
        asset,
        platform: class.platform,
        arch: class.arch,
        format: class.format,
        priority: class.format.priority(),
    }
}
