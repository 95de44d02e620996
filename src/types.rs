//! Core types for imgfetch

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::TaskError;

/// File extension used for every saved resource
pub const FILE_EXTENSION: &str = "jpg";

/// Filename prefix distinguishing the output of the two runners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePrefix {
    /// Files written by the sequential runner (`sync_N.jpg`)
    Sync,
    /// Files written by the concurrent runner (`async_N.jpg`)
    Async,
}

impl NamePrefix {
    /// Prefix as it appears in file names
    pub fn as_str(&self) -> &'static str {
        match self {
            NamePrefix::Sync => "sync",
            NamePrefix::Async => "async",
        }
    }
}

impl std::fmt::Display for NamePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution strategy of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One task after another, fail-fast
    Sequential,
    /// All tasks at once, failures isolated
    Concurrent,
}

impl RunMode {
    /// Prefix used when the caller does not pick one
    pub fn default_prefix(&self) -> NamePrefix {
        match self {
            RunMode::Sequential => NamePrefix::Sync,
            RunMode::Concurrent => NamePrefix::Async,
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Sequential => f.write_str("sequential"),
            RunMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// One unit of work: fetch once, save as `{prefix}_{index}.jpg`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DownloadTask {
    /// 1-based task index
    pub index: usize,
    /// Filename prefix
    pub prefix: NamePrefix,
}

impl DownloadTask {
    /// Create a task
    pub fn new(index: usize, prefix: NamePrefix) -> Self {
        Self { index, prefix }
    }

    /// File name derived from prefix and index
    ///
    /// ```
    /// use imgfetch::types::{DownloadTask, NamePrefix};
    ///
    /// assert_eq!(DownloadTask::new(3, NamePrefix::Async).file_name(), "async_3.jpg");
    /// ```
    pub fn file_name(&self) -> String {
        format!("{}_{}.{}", self.prefix, self.index, FILE_EXTENSION)
    }

    /// Full destination path inside `target_dir`
    pub fn destination(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(self.file_name())
    }
}

/// A file written by a successful task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFile {
    /// 1-based task index
    pub index: usize,
    /// Where the body was written
    pub path: PathBuf,
    /// Body length in bytes
    pub bytes: u64,
}

/// Result of one fetch-and-save unit
pub type DownloadOutcome = std::result::Result<SavedFile, TaskError>;

/// Summary of a finished run
#[derive(Debug)]
pub struct RunReport {
    /// Strategy used
    pub mode: RunMode,
    /// Prefix of the files written
    pub prefix: NamePrefix,
    /// Wall-clock time of the whole run, validation included
    pub elapsed: Duration,
    /// Files written, sorted by index
    pub saved: Vec<SavedFile>,
    /// Failed tasks, sorted by index (always empty for a successful sequential run)
    pub failures: Vec<TaskError>,
}

impl RunReport {
    /// True when every task saved its file
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total bytes written
    pub fn total_bytes(&self) -> u64 {
        self.saved.iter().map(|f| f.bytes).sum()
    }

    /// Indices of the failed tasks
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|e| e.index).collect()
    }
}

/// Progress event emitted during a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Validation passed and tasks are about to start
    RunStarted {
        /// Strategy used
        mode: RunMode,
        /// Number of tasks
        count: usize,
    },

    /// A task issued its request
    TaskStarted {
        /// Filename prefix
        prefix: NamePrefix,
        /// Task index
        index: usize,
    },

    /// A task wrote its file
    TaskSaved {
        /// Filename prefix
        prefix: NamePrefix,
        /// Task index
        index: usize,
        /// Written file
        path: PathBuf,
        /// Body length in bytes
        bytes: u64,
    },

    /// A task failed
    TaskFailed {
        /// Filename prefix
        prefix: NamePrefix,
        /// Task index
        index: usize,
        /// Error message
        error: String,
    },

    /// A run finished (for the sequential runner, also after a fail-fast abort)
    RunFinished {
        /// Strategy used
        mode: RunMode,
        /// Wall-clock time in milliseconds
        elapsed_ms: u64,
        /// Number of files written
        succeeded: usize,
        /// Number of failed tasks
        failed: usize,
    },
}
