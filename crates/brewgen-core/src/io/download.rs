//! Asset download with streaming SHA256 computation.
//!
//! The selected asset is held in memory only; nothing is written to disk.
//! One attempt per call: retry policy belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use brewgen_schema::Sha256Digest;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::Reporter;
use crate::paths::filename_from_url;

/// Default cap on a single download (512 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 512 * 1024 * 1024;

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_mins(5);

/// Failure to fetch a URL.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body is larger than the configured cap.
    #[error("{url} exceeds the download limit of {limit} bytes")]
    TooLarge {
        /// Requested URL.
        url: String,
        /// Configured cap in bytes.
        limit: u64,
    },
}

/// Knobs for the HTTP transport. Passed in explicitly; never read from the
/// environment here.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Whole-request timeout; `None` leaves the transport default.
    pub timeout: Option<Duration>,
    /// Maximum number of body bytes accepted.
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: crate::USER_AGENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Downloaded bytes and their digest.
///
/// `sha256` is computed over exactly `bytes`.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Response body.
    pub bytes: Bytes,
    /// SHA-256 of `bytes`.
    pub sha256: Sha256Digest,
}

/// Anything that can turn a URL into bytes plus their digest.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch `url` once.
    async fn fetch(&self, url: &str, reporter: &dyn Reporter) -> Result<Fetched, DownloadError>;
}

/// [`ContentSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_bytes: u64,
}

impl HttpFetcher {
    /// Build a fetcher with its own client configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Http`] if the TLS backend fails to initialise.
    pub fn new(config: &FetchConfig) -> Result<Self, DownloadError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            max_bytes: config.max_bytes,
        })
    }

    /// Reuse an existing client.
    pub fn with_client(client: Client, max_bytes: u64) -> Self {
        Self { client, max_bytes }
    }
}

#[async_trait]
impl ContentSource for HttpFetcher {
    async fn fetch(&self, url: &str, reporter: &dyn Reporter) -> Result<Fetched, DownloadError> {
        let name = filename_from_url(url);
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let total = resp.content_length();
        if total.is_some_and(|len| len > self.max_bytes) {
            return Err(DownloadError::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }

        reporter.downloading(name, 0, total);

        let mut buf = BytesMut::with_capacity(total.unwrap_or(0) as usize);
        let mut hasher = Sha256::new();
        let mut stream = resp.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if (buf.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(DownloadError::TooLarge {
                    url: url.to_string(),
                    limit: self.max_bytes,
                });
            }
            hasher.update(&chunk);
            buf.extend_from_slice(&chunk);
            reporter.downloading(name, buf.len() as u64, total);
        }

        let sha256 = Sha256Digest::from_hasher(hasher);
        debug!(url, bytes = buf.len(), %sha256, "fetched");

        Ok(Fetched {
            bytes: buf.freeze(),
            sha256,
        })
    }
}
