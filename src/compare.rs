//! Sequential vs concurrent comparison
//!
//! Runs both strategies against the same request, one after the other, and
//! keeps each phase's result. A failed phase never prevents the next one.

use std::time::Duration;

use crate::downloader::ImageDownloader;
use crate::error::Result;
use crate::types::RunReport;

/// Results of both phases
#[derive(Debug)]
pub struct Comparison {
    /// Sequential phase (`sync_N.jpg`)
    pub sequential: Result<RunReport>,
    /// Concurrent phase (`async_N.jpg`)
    pub concurrent: Result<RunReport>,
}

impl Comparison {
    /// True when both phases ran and saved every file
    pub fn is_success(&self) -> bool {
        let complete = |phase: &Result<RunReport>| phase.as_ref().is_ok_and(RunReport::is_complete);
        complete(&self.sequential) && complete(&self.concurrent)
    }

    /// Sequential elapsed time divided by concurrent elapsed time
    ///
    /// `None` unless both phases returned a report with a non-zero duration.
    pub fn speedup(&self) -> Option<f64> {
        let sequential = elapsed(&self.sequential)?;
        let concurrent = elapsed(&self.concurrent)?;
        if concurrent.is_zero() {
            return None;
        }
        Some(sequential.as_secs_f64() / concurrent.as_secs_f64())
    }
}

fn elapsed(phase: &Result<RunReport>) -> Option<Duration> {
    phase.as_ref().ok().map(|report| report.elapsed)
}

/// Run the sequential phase, then the concurrent phase
///
/// # Examples
///
/// ```no_run
/// use imgfetch::{Config, DownloadRequest, ImageDownloader, run_comparison};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = DownloadRequest::new("/tmp/images", "https://placebear.com/g/200/300", 5);
/// let downloader = ImageDownloader::new(Config::new(request))?;
///
/// let comparison = run_comparison(&downloader).await;
/// if let Some(speedup) = comparison.speedup() {
///     println!("concurrent run was {:.1}x faster", speedup);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_comparison(downloader: &ImageDownloader) -> Comparison {
    let sequential = downloader.download_sequential().await;
    if let Err(e) = &sequential {
        tracing::warn!(error = %e, "Sequential phase failed, continuing with concurrent phase");
    }

    let concurrent = downloader.download_concurrent().await;
    if let Err(e) = &concurrent {
        tracing::warn!(error = %e, "Concurrent phase failed");
    }

    Comparison {
        sequential,
        concurrent,
    }
}
