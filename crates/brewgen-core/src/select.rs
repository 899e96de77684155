//! Candidate filtering and deterministic selection.
//!
//! Selection is a pure function of the candidate list and the target: no
//! randomness, no clock, no environment.

use brewgen_schema::{Arch, ClassifiedAsset, Platform, ReleaseAsset};
use tracing::debug;

use crate::error::{Error, Result};

/// Suffixes of files that describe other assets rather than being installable.
const SIDECAR_SUFFIXES: &[&str] = &[
    ".sha256",
    ".sha256sum",
    ".sha512",
    ".sha1",
    ".md5",
    ".asc",
    ".sig",
    ".pem",
    ".sbom",
    ".spdx.json",
    ".intoto.jsonl",
];

/// Whether `name` is a checksum, signature or provenance file.
pub fn is_sidecar(name: &str) -> bool {
    let lower = name.to_lowercase();
    SIDECAR_SUFFIXES.iter().any(|s| lower.ends_with(s))
        || lower.contains("checksums")
        || lower.starts_with("sha256sums")
        || lower.starts_with("sha512sums")
}

/// Split release assets into installable candidates and metadata sidecars,
/// preserving order in both halves.
pub fn split_sidecars(assets: Vec<ReleaseAsset>) -> (Vec<ReleaseAsset>, Vec<ReleaseAsset>) {
    assets.into_iter().partition(|a| !is_sidecar(&a.name))
}

/// Keep assets built for `target` or of unknown platform, in input order.
///
/// Unknown-platform assets survive as fallbacks because plain names such as
/// `tool.zip` are common. Any other concrete platform is dropped.
pub fn filter_target(target: Platform, assets: Vec<ClassifiedAsset>) -> Vec<ClassifiedAsset> {
    assets
        .into_iter()
        .filter(|a| {
            let keep = a.platform == target || a.platform == Platform::Unknown;
            if !keep {
                debug!(
                    asset = %a.name(),
                    platform = %a.platform,
                    "dropping incompatible asset"
                );
            }
            keep
        })
        .collect()
}

/// Arch preference within one priority class: exact, then unknown, then mismatched.
fn arch_rank(asset: Arch, target: Arch) -> u8 {
    if asset == target {
        0
    } else if asset == Arch::Unknown {
        1
    } else {
        2
    }
}

/// Pick the single best candidate.
///
/// Ordering: lowest format priority, then architecture rank against
/// `target_arch`, then first occurrence.
///
/// # Errors
///
/// Returns [`Error::NoCandidate`] with `considered: 0` when `candidates`
/// is empty. [`select_asset`](crate::select_asset) reports the pre-filter
/// count instead.
pub fn select_best(
    candidates: &[ClassifiedAsset],
    target_platform: Platform,
    target_arch: Arch,
) -> Result<ClassifiedAsset> {
    // `min_by_key` keeps the first of equal minima, which gives the
    // first-occurrence tie-break for free.
    candidates
        .iter()
        .min_by_key(|a| (a.priority, arch_rank(a.arch, target_arch)))
        .cloned()
        .ok_or(Error::NoCandidate {
            platform: target_platform,
            arch: target_arch,
            considered: 0,
        })
}
