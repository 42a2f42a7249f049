//! Target page fetching

use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch did not produce a page body.
///
/// Fetch failures are recovered locally by the checker: they end the run
/// without touching the recorded digest, and the process still exits
/// successfully so the scheduler does not flag transient network trouble.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: timeout, DNS, connection refused.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered, but not with a 2xx.
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Issues the bounded-timeout GET against the monitored page.
#[derive(Debug)]
pub struct PageFetcher {
    client: Client,
    url: String,
}

impl PageFetcher {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the page body as text.
    pub fn fetch(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text()?)
    }
}
