//! Fetching the bid from the relay endpoint.
//!
//! The whole exchange (connect, status, body) runs under one absolute
//! deadline. The relay's own budget must fit inside it, which `Args` checks at
//! startup.
use fx_common::BidResponse;
use log::debug;
use reqwest::Client;
use tokio::time::{Instant, timeout_at};

use crate::error::ClientError;

/// HTTP client bound to one relay URL.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    url: String,
}

impl RelayClient {
    /// Build a client for the relay at `url`.
    pub fn new(url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Relay URL this client calls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current bid, giving up with `ClientError::Timeout` at `deadline`.
    pub async fn fetch_bid(&self, deadline: Instant) -> Result<f64, ClientError> {
        timeout_at(deadline, self.request())
            .await
            .unwrap_or(Err(ClientError::Timeout))
    }

    async fn request(&self) -> Result<f64, ClientError> {
        debug!("Requesting bid from {}", self.url);
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::BadStatus(status.as_u16()));
        }
        let body = response.bytes().await?;
        let decoded: BidResponse = serde_json::from_slice(&body)?;
        Ok(decoded.bid)
    }
}
