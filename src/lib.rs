//! # imgfetch
//!
//! Downloads a batch of copies of one remote image into a local directory,
//! once sequentially and once concurrently, and reports how long each
//! strategy took.
//!
//! ## Strategies
//!
//! - **Sequential** - tasks run one after another and the first failure aborts
//!   the run (`sync_1.jpg`, `sync_2.jpg`, ...)
//! - **Concurrent** - every task is spawned at once; failures are collected and
//!   never cancel sibling tasks (`async_1.jpg`, `async_2.jpg`, ...)
//!
//! ## Quick Start
//!
//! ```no_run
//! use imgfetch::{Config, DownloadRequest, Event, ImageDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = DownloadRequest::new("/tmp/images", "https://placebear.com/g/200/300", 5);
//!     let downloader = ImageDownloader::new(Config::new(request))?;
//!
//!     // Subscribe to events
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             if let Event::TaskSaved { index, .. } = event {
//!                 println!("Image {} saved", index);
//!             }
//!         }
//!     });
//!
//!     let report = downloader.download_concurrent().await?;
//!     println!("{} files in {:?}", report.saved.len(), report.elapsed);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Sequential vs concurrent comparison
pub mod compare;
/// Configuration types
pub mod config;
/// Core downloader implementation (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// HTTP fetching behind a pluggable trait
pub mod fetch;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;
/// Request validation
pub mod validation;

// Re-export commonly used types
pub use compare::{Comparison, run_comparison};
pub use config::{Config, DownloadRequest, HttpConfig};
pub use downloader::{ImageDownloader, fetch_and_save};
pub use error::{Error, FetchError, Result, TaskError, TaskErrorKind};
pub use fetch::{Fetcher, HttpFetcher};
pub use types::{
    DownloadOutcome, DownloadTask, Event, NamePrefix, RunMode, RunReport, SavedFile,
};
