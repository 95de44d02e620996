//! The fetch-and-save unit shared by both runners.

use std::path::Path;

use tokio::task::{JoinError, JoinHandle};

use crate::error::{TaskError, TaskErrorKind};
use crate::fetch::Fetcher;
use crate::types::{DownloadOutcome, DownloadTask, Event, SavedFile};
use crate::utils::write_atomic;

use super::ImageDownloader;

/// Fetch `url` once and save the body as `{prefix}_{index}.jpg` in `target_dir`
///
/// The whole body is read into memory and then written atomically, replacing
/// any file of the same name. A failed unit leaves no file behind. Every error
/// carries the task index.
///
/// # Examples
///
/// ```no_run
/// use imgfetch::config::HttpConfig;
/// use imgfetch::downloader::fetch_and_save;
/// use imgfetch::fetch::HttpFetcher;
/// use imgfetch::types::{DownloadTask, NamePrefix};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(&HttpConfig::default())?;
/// let saved = fetch_and_save(
///     &fetcher,
///     "https://placebear.com/g/200/300",
///     Path::new("/tmp/images"),
///     DownloadTask::new(1, NamePrefix::Sync),
/// )
/// .await?;
/// println!("wrote {} bytes to {}", saved.bytes, saved.path.display());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_and_save(
    fetcher: &dyn Fetcher,
    url: &str,
    target_dir: &Path,
    task: DownloadTask,
) -> DownloadOutcome {
    let body = fetcher
        .fetch(url, task.index)
        .await
        .map_err(|e| TaskError::new(task.index, e))?;

    let path = task.destination(target_dir);
    write_atomic(&path, &body).await.map_err(|source| {
        TaskError::new(
            task.index,
            TaskErrorKind::Save {
                path: path.clone(),
                source,
            },
        )
    })?;

    Ok(SavedFile {
        index: task.index,
        path,
        bytes: body.len() as u64,
    })
}

impl ImageDownloader {
    /// Run one unit with logging and progress events
    pub(crate) async fn run_unit(&self, task: DownloadTask) -> DownloadOutcome {
        self.emit_event(Event::TaskStarted {
            prefix: task.prefix,
            index: task.index,
        });
        tracing::info!(prefix = %task.prefix, index = task.index, "Downloading image");

        let request = &self.config.request;
        let outcome = fetch_and_save(
            self.fetcher.as_ref(),
            &request.url,
            &request.target_dir,
            task,
        )
        .await;

        match &outcome {
            Ok(saved) => {
                tracing::info!(
                    prefix = %task.prefix,
                    index = task.index,
                    bytes = saved.bytes,
                    path = %saved.path.display(),
                    "Image saved"
                );
                self.emit_event(Event::TaskSaved {
                    prefix: task.prefix,
                    index: task.index,
                    path: saved.path.clone(),
                    bytes: saved.bytes,
                });
            }
            Err(e) => self.emit_failure(task, e),
        }

        outcome
    }

    /// Run one unit on its own tokio task
    ///
    /// The unit owns a clone of the downloader, so nothing is borrowed from
    /// the caller and a panic stays inside the spawned task.
    pub(crate) fn spawn_unit(&self, task: DownloadTask) -> JoinHandle<DownloadOutcome> {
        let downloader = self.clone();
        tokio::spawn(async move { downloader.run_unit(task).await })
    }

    /// Turn a joined unit into an outcome, mapping a panic or abort to
    /// [`TaskErrorKind::Unexpected`]
    pub(crate) fn settle(
        &self,
        task: DownloadTask,
        joined: std::result::Result<DownloadOutcome, JoinError>,
    ) -> DownloadOutcome {
        joined.unwrap_or_else(|e| {
            let error = TaskError::new(task.index, TaskErrorKind::Unexpected(join_error_message(e)));
            // run_unit never got to report this one
            self.emit_failure(task, &error);
            Err(error)
        })
    }

    fn emit_failure(&self, task: DownloadTask, error: &TaskError) {
        self.emit_event(Event::TaskFailed {
            prefix: task.prefix,
            index: task.index,
            error: error.to_string(),
        });
    }
}

fn join_error_message(e: JoinError) -> String {
    if e.is_cancelled() {
        return "task was cancelled".to_string();
    }

    let payload = e.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("task panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("task panicked: {}", msg)
    } else {
        "task panicked".to_string()
    }
}
