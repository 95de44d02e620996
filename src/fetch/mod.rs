//! Resource fetching
//!
//! The [`Fetcher`] trait is the seam between the runners and the network. It
//! issues one GET per call and returns the whole body in memory.
//!
//! - [`HttpFetcher`]: production implementation backed by a shared `reqwest` client
//!
//! Tests substitute their own implementations to inject failures for specific
//! task indices.

mod http;

pub use self::http::HttpFetcher;

use crate::error::FetchError;
use async_trait::async_trait;
use bytes::Bytes;

/// Fetches a resource for one task
///
/// Implementations must be safe to call concurrently from many tasks; each
/// call is independent and must not block other calls.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` on behalf of task `index` and return the full body
    ///
    /// Any transport failure or non-success status is an error.
    async fn fetch(&self, url: &str, index: usize) -> Result<Bytes, FetchError>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}
