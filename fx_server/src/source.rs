//! Outbound fetch of the raw quote from the upstream provider.
//!
//! `QuoteSource` is the seam the pipeline depends on; `HttpQuoteSource` is the
//! production implementation backed by `reqwest`. A fetch issues exactly one
//! request. The whole exchange, including reading the body, runs under the
//! caller's absolute deadline, and there are no retries.
use async_trait::async_trait;
use fx_common::RawPayload;
use log::debug;
use reqwest::Client;
use tokio::time::{Instant, timeout_at};

use crate::error::SourceError;

/// Anything that can produce one raw upstream payload before a deadline.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Issue a single request, giving up with `SourceError::Timeout` at `deadline`.
    async fn fetch(&self, deadline: Instant) -> Result<RawPayload, SourceError>;
}

/// HTTP GET against a fixed provider URL.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    url: String,
}

impl HttpQuoteSource {
    /// Build a source with a fresh HTTP client.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, url))
    }

    /// Build a source on top of an existing client (shares its connection pool).
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Provider URL this source calls.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self) -> Result<RawPayload, SourceError> {
        let response = self.client.get(&self.url).send().await.map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::BadStatus(status.as_u16()));
        }
        let body = response.bytes().await.map_err(classify)?;
        debug!("Upstream answered {} with {} bytes", status, body.len());
        Ok(RawPayload::new(body.to_vec()))
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch(&self, deadline: Instant) -> Result<RawPayload, SourceError> {
        debug!("Fetching quote from {}", self.url);
        timeout_at(deadline, self.request())
            .await
            .unwrap_or(Err(SourceError::Timeout))
    }
}

fn classify(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Unreachable(err.to_string())
    }
}
