//! Error types for imgfetch
//!
//! This module provides the error taxonomy for the library:
//! - Run-level errors ([`Error`]) for invalid input, configuration and HTTP client setup
//! - Per-task errors ([`TaskError`]) tagged with the 1-based index of the failing unit
//! - Fetch errors ([`FetchError`]) separating HTTP status failures from transport failures
//! - Machine-readable error codes and process exit codes for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for imgfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for imgfetch
///
/// Validation errors are fatal to a run before any task starts. Task errors are
/// only returned as run-level errors by the sequential runner; the concurrent
/// runner collects them in its report instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid request input (path, URL or count)
    #[error("invalid {field}: {message}")]
    InvalidInput {
        /// The request field that failed validation (e.g., "path")
        field: &'static str,
        /// Human-readable description of the problem
        message: String,
    },

    /// A single download task failed
    #[error(transparent)]
    Task(#[from] TaskError),

    /// Configuration file could not be used
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration file involved, if any
        path: Option<PathBuf>,
    },

    /// Failed to build the HTTP client
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failure of one fetch-and-save unit, tagged with its index
#[derive(Debug, Error)]
#[error("task {index} failed: {kind}")]
pub struct TaskError {
    /// 1-based index of the failing task
    pub index: usize,
    /// What went wrong
    pub kind: TaskErrorKind,
}

/// Classification of a task failure
#[derive(Debug, Error)]
pub enum TaskErrorKind {
    /// Network or HTTP failure while fetching the resource
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Filesystem failure while saving the body
    #[error("save error for {}: {source}", .path.display())]
    Save {
        /// The destination path that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Anything else (e.g., the task panicked)
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// HTTP fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// Request could not be sent or no response was received
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// The underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// Requested URL
        url: String,
        /// The underlying reqwest error
        #[source]
        source: reqwest::Error,
    },
}

impl TaskError {
    /// Create a task error for the given index
    pub fn new(index: usize, kind: impl Into<TaskErrorKind>) -> Self {
        Self {
            index,
            kind: kind.into(),
        }
    }

    /// Machine-readable code for the failure class
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            TaskErrorKind::Fetch(_) => "fetch_error",
            TaskErrorKind::Save { .. } => "save_error",
            TaskErrorKind::Unexpected(_) => "unexpected_error",
        }
    }
}

impl Error {
    /// Shorthand for an [`Error::InvalidInput`]
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Returns true for errors raised before any task was started
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidInput { .. } | Error::Config { .. })
    }

    /// Index of the failing task, if this error came from a task
    pub fn task_index(&self) -> Option<usize> {
        match self {
            Error::Task(e) => Some(e.index),
            _ => None,
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidInput { .. } => "invalid_input",
            Error::Task(e) => e.error_code(),
            Error::Config { .. } => "config_error",
            Error::HttpClient(_) => "http_client_error",
        }
    }

    /// Process exit code for the CLI
    ///
    /// Invalid input and configuration problems exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        if self.is_validation() { 2 } else { 1 }
    }
}
