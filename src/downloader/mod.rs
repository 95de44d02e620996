//! Core downloader implementation split into focused submodules.
//!
//! The `ImageDownloader` struct and its methods are organized by concern:
//! - [`unit`] - The fetch-and-save unit shared by both runners
//! - [`sequential`] - Fail-fast, one task at a time
//! - [`concurrent`] - All tasks at once with isolated failures

mod concurrent;
mod sequential;
mod unit;

pub use unit::fetch_and_save;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::types::{Event, RunMode};
use std::sync::Arc;
use std::time::Duration;

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
///
/// Clones are handed to spawned tasks, so every unit of a concurrent run sees
/// the same configuration, fetcher and event channel.
#[derive(Clone)]
pub struct ImageDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Fetcher used by every task (trait object for pluggable implementations)
    pub(crate) fetcher: Arc<dyn Fetcher>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl ImageDownloader {
    /// Create a new ImageDownloader backed by a reqwest client
    ///
    /// The request is not validated here; each run validates it before
    /// starting any task.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create an ImageDownloader with a custom fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        // A zero-capacity broadcast channel panics on creation
        let (event_tx, _rx) = tokio::sync::broadcast::channel(config.event_capacity.max(1));

        tracing::debug!(fetcher = fetcher.name(), "Downloader initialized");

        Self {
            config: Arc::new(config),
            fetcher,
            event_tx,
        }
    }

    /// Subscribe to progress events
    ///
    /// Events sent before subscribing are not replayed.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Emit an event to all subscribers
    pub(crate) fn emit_event(&self, event: Event) {
        // send() returns Err if there are no receivers, which is fine - we just drop the event
        self.event_tx.send(event).ok();
    }

    /// Emit the closing event of a run
    pub(crate) fn finish_run(
        &self,
        mode: RunMode,
        elapsed: Duration,
        succeeded: usize,
        failed: usize,
    ) {
        tracing::info!(
            mode = %mode,
            elapsed_ms = elapsed.as_millis() as u64,
            succeeded,
            failed,
            "Run finished"
        );
        self.emit_event(Event::RunFinished {
            mode,
            elapsed_ms: elapsed.as_millis() as u64,
            succeeded,
            failed,
        });
    }
}
