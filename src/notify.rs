//! Webhook notification delivery
//!
//! Delivers a plain text message to the configured chat webhook as a JSON
//! POST. The payload shape (`{"content": "..."}`) is what Discord-style
//! webhooks accept.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why a notification was not delivered.
///
/// Delivery failures never block digest persistence; the checker logs them
/// and carries on, so a webhook outage cannot wedge change tracking.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook returned status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts messages to the pre-shared webhook URL.
#[derive(Debug)]
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(webhook_url: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    /// Sends one message. Non-2xx responses count as delivery failure.
    pub fn send(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookPayload { content: message })
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }
        Ok(())
    }
}
