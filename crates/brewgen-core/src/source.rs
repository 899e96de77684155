//! Release metadata input.
//!
//! Talking to a hosting API is someone else's job; the pipeline only needs a
//! [`Release`] from somewhere.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use brewgen_schema::Release;
use thiserror::Error;
use tracing::debug;

/// Failure to obtain release metadata.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The release document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Document path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The release document is not valid release JSON.
    #[error("Invalid release document {}: {source}", path.display())]
    Parse {
        /// Document path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can supply one release's tag and assets.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the release to resolve.
    async fn fetch_release(&self) -> Result<Release, SourceError>;
}

/// A release already held in memory.
#[derive(Debug, Clone)]
pub struct StaticRelease(pub Release);

#[async_trait]
impl ReleaseSource for StaticRelease {
    async fn fetch_release(&self) -> Result<Release, SourceError> {
        Ok(self.0.clone())
    }
}

/// A release document on disk in the GitHub release JSON shape
/// (`tag_name`, `assets[].name`, `assets[].browser_download_url`, `assets[].size`).
#[derive(Debug, Clone)]
pub struct JsonReleaseFile {
    path: PathBuf,
}

impl JsonReleaseFile {
    /// Source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Document path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReleaseSource for JsonReleaseFile {
    async fn fetch_release(&self) -> Result<Release, SourceError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let release: Release =
            serde_json::from_slice(&raw).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            tag = %release.tag,
            assets = release.assets.len(),
            "loaded release document"
        );
        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_json_release_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tag_name":"v2.0.1","assets":[{{"name":"tool-linux-x64.tar.gz","browser_download_url":"https://example.com/tool-linux-x64.tar.gz","size":1234}}]}}"#
        )
        .unwrap();

        let release = JsonReleaseFile::new(file.path()).fetch_release().await.unwrap();
        assert_eq!(release.tag, "v2.0.1");
        assert_eq!(release.version(), "2.0.1");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].name, "tool-linux-x64.tar.gz");
    }

    #[tokio::test]
    async fn test_json_release_file_errors() {
        let missing = JsonReleaseFile::new("/nonexistent/release.json");
        assert!(matches!(
            missing.fetch_release().await,
            Err(SourceError::Io { .. })
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let bad = JsonReleaseFile::new(file.path());
        assert!(matches!(bad.fetch_release().await, Err(SourceError::Parse { .. })));
    }
}
