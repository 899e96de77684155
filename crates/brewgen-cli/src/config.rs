//! Settings file and layering.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use brewgen_core::FetchConfig;
use brewgen_schema::{Arch, Platform};
use serde::Deserialize;
use tracing::debug;

/// Contents of `config.toml`. Every key is optional.
///
/// ```toml
/// platform = "linux"
/// arch = "arm64"
/// verify_checksums = true
/// timeout_secs = 120
/// max_bytes = 268435456
/// user_agent = "my-tap-bot/1.0"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default target platform.
    pub platform: Option<Platform>,
    /// Default target architecture.
    pub arch: Option<Arch>,
    /// Whether to cross-check upstream checksums.
    pub verify_checksums: Option<bool>,
    /// Download timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Download size cap in bytes.
    pub max_bytes: Option<u64>,
    /// `User-Agent` header override.
    pub user_agent: Option<String>,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid settings file")
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present; otherwise built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_path().filter(|p| p.is_file()) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("In {}", path.display()))?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Platform from the flag, then the file, then the host.
    pub fn platform(&self, flag: Option<Platform>) -> Platform {
        flag.or(self.platform).unwrap_or_else(Platform::current)
    }

    /// Architecture from the flag, then the file, then the host.
    pub fn arch(&self, flag: Option<Arch>) -> Arch {
        flag.or(self.arch).unwrap_or_else(Arch::current)
    }

    /// Checksum verification: `--no-verify` wins, then the file, then on.
    pub fn verify_checksums(&self, no_verify: bool) -> bool {
        !no_verify && self.verify_checksums.unwrap_or(true)
    }

    /// Transport settings with flag overrides applied.
    pub fn fetch_config(&self, timeout_secs: Option<u64>, max_bytes: Option<u64>) -> FetchConfig {
        let mut config = FetchConfig::default();
        if let Some(ua) = &self.user_agent {
            config.user_agent.clone_from(ua);
        }
        if let Some(secs) = timeout_secs.or(self.timeout_secs) {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(limit) = max_bytes.or(self.max_bytes) {
            config.max_bytes = limit;
        }
        config
    }
}

/// `<config_dir>/brewgen/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("brewgen").join("config.toml"))
}
