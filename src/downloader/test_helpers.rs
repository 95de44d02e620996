//! Shared test helpers for creating ImageDownloader instances in tests.

use crate::config::{Config, DownloadRequest};
use crate::downloader::ImageDownloader;
use crate::error::FetchError;
use crate::fetch::Fetcher;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Body served by the fake fetchers
pub(crate) const TEST_BODY: &[u8] = b"\xff\xd8\xff\xe0fake jpeg body";

/// URL used in test requests; the fake fetchers never touch the network
pub(crate) const TEST_URL: &str = "http://example.test/img";

/// Fetcher that serves a fixed body and fails or panics for chosen indices
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    failing: HashSet<usize>,
    panicking: HashSet<usize>,
    calls: Mutex<Vec<usize>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer HTTP 500 for these indices
    pub(crate) fn failing(mut self, indices: &[usize]) -> Self {
        self.failing.extend(indices);
        self
    }

    /// Panic for these indices
    pub(crate) fn panicking(mut self, indices: &[usize]) -> Self {
        self.panicking.extend(indices);
        self
    }

    /// Indices fetched so far, in call order
    pub(crate) fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, index: usize) -> Result<Bytes, FetchError> {
        self.calls.lock().unwrap().push(index);

        if self.panicking.contains(&index) {
            panic!("scripted panic for task {index}");
        }
        if self.failing.contains(&index) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        Ok(Bytes::from_static(TEST_BODY))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Fetcher that only answers once `width` fetches are in flight at the same time
pub(crate) struct BarrierFetcher {
    barrier: tokio::sync::Barrier,
}

impl BarrierFetcher {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            barrier: tokio::sync::Barrier::new(width),
        }
    }
}

#[async_trait]
impl Fetcher for BarrierFetcher {
    async fn fetch(&self, _url: &str, index: usize) -> Result<Bytes, FetchError> {
        self.barrier.wait().await;
        Ok(Bytes::from(format!("body {index}")))
    }

    fn name(&self) -> &'static str {
        "barrier"
    }
}

/// Helper to create a test ImageDownloader writing into a fresh temp dir.
/// Returns the downloader and the tempdir (which must be kept alive).
pub(crate) fn create_test_downloader(
    count: usize,
    fetcher: Arc<dyn Fetcher>,
) -> (ImageDownloader, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let config = Config::new(DownloadRequest::new(temp_dir.path(), TEST_URL, count));
    (ImageDownloader::with_fetcher(config, fetcher), temp_dir)
}

/// Sorted file names in `dir`
pub(crate) fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Drain every event currently buffered in `rx`
pub(crate) fn drain_events(
    rx: &mut tokio::sync::broadcast::Receiver<crate::types::Event>,
) -> Vec<crate::types::Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
