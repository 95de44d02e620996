//! Configuration types for imgfetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to download and where to put it
///
/// Used as a flattened sub-config within [`Config`], so a JSON config file
/// keeps `target_dir`, `url` and `count` at the top level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Existing directory the files are written into
    #[serde(default)]
    pub target_dir: PathBuf,

    /// URL fetched once per task
    #[serde(default)]
    pub url: String,

    /// Number of tasks per run (default: 5)
    #[serde(default = "default_count")]
    pub count: usize,
}

impl Default for DownloadRequest {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::new(),
            url: String::new(),
            count: default_count(),
        }
    }
}

impl DownloadRequest {
    /// Create a request for `count` copies of `url` inside `target_dir`
    pub fn new(target_dir: impl Into<PathBuf>, url: impl Into<String>, count: usize) -> Self {
        Self {
            target_dir: target_dir.into(),
            url: url.into(),
            count,
        }
    }

    /// Check count, path and URL, in that order
    ///
    /// Runs before any network or filesystem write; see [`crate::validation`].
    pub fn validate(&self) -> Result<()> {
        crate::validation::validate_count(self.count)?;
        crate::validation::validate_path(&self.target_dir)?;
        crate::validation::validate_url(&self.url)?;
        Ok(())
    }
}

/// HTTP client settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request (default: "imgfetch/<version>")
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

/// Main configuration for [`ImageDownloader`](crate::ImageDownloader)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// What to download and where
    #[serde(flatten)]
    pub request: DownloadRequest,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Capacity of the progress event channel (default: 1000)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DownloadRequest::default())
    }
}

impl Config {
    /// Build a config for the given request with default settings
    pub fn new(request: DownloadRequest) -> Self {
        Self {
            request,
            http: HttpConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }

    /// Load a config from a JSON file
    ///
    /// Missing fields take their defaults, so a file may contain only the
    /// settings it wants to change.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read config file: {}", e),
            path: Some(path.to_path_buf()),
        })?;

        serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse config file: {}", e),
            path: Some(path.to_path_buf()),
        })
    }

    /// Target directory
    pub fn target_dir(&self) -> &Path {
        &self.request.target_dir
    }
}

fn default_count() -> usize {
    5
}

fn default_user_agent() -> String {
    concat!("imgfetch/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_event_capacity() -> usize {
    1000
}
