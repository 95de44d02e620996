//! Sequential runner: one task at a time, abort on the first failure.

use std::time::Instant;

use crate::error::Result;
use crate::types::{DownloadTask, Event, NamePrefix, RunMode, RunReport};

use super::ImageDownloader;

impl ImageDownloader {
    /// Download every file one after another, writing `sync_N.jpg`
    ///
    /// See [`download_sequential_as`](Self::download_sequential_as).
    pub async fn download_sequential(&self) -> Result<RunReport> {
        self.download_sequential_as(RunMode::Sequential.default_prefix())
            .await
    }

    /// Download every file one after another using `prefix` for file names
    ///
    /// The request is validated once before anything runs. Tasks run in index
    /// order and each one finishes before the next starts. The first failure
    /// stops the run and is returned as [`Error::Task`](crate::Error::Task)
    /// carrying the failing index; files of earlier tasks stay on disk and
    /// later indices are never attempted.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`](crate::Error::InvalidInput) if the request is invalid
    /// - [`Error::Task`](crate::Error::Task) for the first failed task
    pub async fn download_sequential_as(&self, prefix: NamePrefix) -> Result<RunReport> {
        let started = Instant::now();
        let request = &self.config.request;
        request.validate()?;

        tracing::info!(count = request.count, prefix = %prefix, "Starting sequential download");
        self.emit_event(Event::RunStarted {
            mode: RunMode::Sequential,
            count: request.count,
        });

        let mut saved = Vec::new();
        for index in 1..=request.count {
            let task = DownloadTask::new(index, prefix);
            let joined = self.spawn_unit(task).await;

            match self.settle(task, joined) {
                Ok(file) => saved.push(file),
                Err(e) => {
                    tracing::error!(
                        index,
                        remaining = request.count - index,
                        error = %e,
                        "Sequential download aborted"
                    );
                    self.finish_run(RunMode::Sequential, started.elapsed(), saved.len(), 1);
                    return Err(e.into());
                }
            }
        }

        let elapsed = started.elapsed();
        self.finish_run(RunMode::Sequential, elapsed, saved.len(), 0);

        Ok(RunReport {
            mode: RunMode::Sequential,
            prefix,
            elapsed,
            saved,
            failures: Vec::new(),
        })
    }
}
