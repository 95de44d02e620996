//! reqwest-backed fetcher

use super::Fetcher;
use crate::config::HttpConfig;
use crate::error::{Error, FetchError, Result};
use async_trait::async_trait;
use bytes::Bytes;

/// Fetcher backed by a `reqwest` client
///
/// The client is an internally synchronised connection pool, so one instance
/// is shared by every task of a run. Concurrent requests each get their own
/// connection.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, index: usize) -> std::result::Result<Bytes, FetchError> {
        tracing::debug!(index, url, "Sending GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;

        tracing::debug!(index, bytes = body.len(), "Response body received");
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
