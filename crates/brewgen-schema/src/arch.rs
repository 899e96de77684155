//! Target platform and CPU architecture.
//!
//! Both enums are closed so that every rule table keyed on them is
//! checked for exhaustiveness by the compiler.
//!
//! # Example
//!
//! ```
//! use brewgen_schema::{Arch, Platform};
//!
//! let target = (Platform::current(), Arch::current());
//! println!("Resolving assets for {}/{}", target.0, target.1);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system a release asset was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux distributions.
    Linux,
    /// Apple macOS (also spelled darwin / osx by vendors).
    #[serde(rename = "macos")]
    MacOS,
    /// Microsoft Windows.
    Windows,
    /// Nothing in the filename identified a platform.
    #[default]
    Unknown,
}

impl Platform {
    /// Get the platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOS
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unknown
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOS => "macos",
            Self::Windows => "windows",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this is a real platform rather than [`Platform::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" | "osx" | "mac" => Ok(Self::MacOS),
            "windows" | "win" | "win32" | "win64" => Ok(Self::Windows),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseTargetError::Platform(s.to_string())),
        }
    }
}

/// CPU architecture a release asset was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// `x86_64` / `amd64` / `x64`.
    #[serde(rename = "x86_64")]
    X86_64,
    /// `arm64` / `aarch64`.
    Arm64,
    /// Nothing in the filename identified an architecture.
    #[default]
    Unknown,
}

impl Arch {
    /// Get the current architecture
    pub fn current() -> Self {
        #[cfg(target_arch = "aarch64")]
        {
            Self::Arm64
        }
        #[cfg(target_arch = "x86_64")]
        {
            Self::X86_64
        }
        #[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
        {
            Self::Unknown
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" | "intel" => Ok(Self::X86_64),
            "arm64" | "aarch64" | "arm" => Ok(Self::Arm64),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseTargetError::Arch(s.to_string())),
        }
    }
}

/// A target string that named no known platform or architecture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTargetError {
    /// Unrecognised platform name.
    #[error("Unknown platform: {0}")]
    Platform(String),
    /// Unrecognised architecture name.
    #[error("Unknown architecture: {0}")]
    Arch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vendor_aliases() {
        assert_eq!("darwin".parse::<Platform>(), Ok(Platform::MacOS));
        assert_eq!("OSX".parse::<Platform>(), Ok(Platform::MacOS));
        assert_eq!("amd64".parse::<Arch>(), Ok(Arch::X86_64));
        assert_eq!("aarch64".parse::<Arch>(), Ok(Arch::Arm64));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("beos".parse::<Platform>().is_err());
        assert!("riscv64".parse::<Arch>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&Platform::MacOS).unwrap(),
            "\"macos\""
        );
        assert_eq!(serde_json::to_string(&Arch::X86_64).unwrap(), "\"x86_64\"");
        assert_eq!(
            serde_json::from_str::<Arch>("\"arm64\"").unwrap(),
            Arch::Arm64
        );
    }
}
