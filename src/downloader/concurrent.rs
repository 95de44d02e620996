//! Concurrent runner: every task at once, failures isolated.

use std::time::Instant;

use futures::future::join_all;

use crate::error::Result;
use crate::types::{DownloadTask, Event, NamePrefix, RunMode, RunReport};

use super::ImageDownloader;

impl ImageDownloader {
    /// Download every file concurrently, writing `async_N.jpg`
    ///
    /// See [`download_concurrent_as`](Self::download_concurrent_as).
    pub async fn download_concurrent(&self) -> Result<RunReport> {
        self.download_concurrent_as(RunMode::Concurrent.default_prefix())
            .await
    }

    /// Download every file concurrently using `prefix` for file names
    ///
    /// The request is validated once, then one tokio task per index is spawned
    /// (no pooling: the width equals `count`). The call waits until every task
    /// has settled. A failing task never cancels or blocks its siblings; each
    /// failure is logged and collected in [`RunReport::failures`].
    ///
    /// # Errors
    ///
    /// Only [`Error::InvalidInput`](crate::Error::InvalidInput). Task failures
    /// do not fail the run.
    pub async fn download_concurrent_as(&self, prefix: NamePrefix) -> Result<RunReport> {
        let started = Instant::now();
        let request = &self.config.request;
        request.validate()?;

        tracing::info!(count = request.count, prefix = %prefix, "Starting concurrent download");
        self.emit_event(Event::RunStarted {
            mode: RunMode::Concurrent,
            count: request.count,
        });

        let mut tasks = Vec::new();
        let mut handles = Vec::new();
        for index in 1..=request.count {
            let task = DownloadTask::new(index, prefix);
            handles.push(self.spawn_unit(task));
            tasks.push(task);
        }

        // Wait for all, never cancel on first error
        let joined = join_all(handles).await;

        let mut saved = Vec::new();
        let mut failures = Vec::new();
        for (task, result) in tasks.into_iter().zip(joined) {
            match self.settle(task, result) {
                Ok(file) => saved.push(file),
                Err(e) => {
                    tracing::warn!(index = task.index, error = %e, "Concurrent task failed");
                    failures.push(e);
                }
            }
        }

        let elapsed = started.elapsed();
        self.finish_run(RunMode::Concurrent, elapsed, saved.len(), failures.len());

        Ok(RunReport {
            mode: RunMode::Concurrent,
            prefix,
            elapsed,
            saved,
            failures,
        })
    }
}
