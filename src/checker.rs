//! The check pipeline: fetch, hash, compare, notify, persist

use crate::config::MonitorConfig;
use crate::digest::content_digest;
use crate::fetch::PageFetcher;
use crate::notify::WebhookNotifier;
use crate::state::DigestStore;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use tracing::{debug, info, warn};

/// How a single run ended. All four outcomes are "success" as far as the
/// invoking scheduler is concerned; only storage errors escape `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No digest was recorded yet; tracking was initialized, nothing notified.
    FirstRun,
    /// Page body hashes to the same digest as last time.
    Unchanged,
    /// Digest differs from the recorded one; a notification was attempted.
    Changed,
    /// The page could not be fetched; recorded state was left untouched.
    FetchFailed,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunOutcome::FirstRun => "first-run",
            RunOutcome::Unchanged => "unchanged",
            RunOutcome::Changed => "changed",
            RunOutcome::FetchFailed => "fetch-failed",
        };
        f.write_str(label)
    }
}

enum Comparison {
    FirstRun,
    Unchanged,
    Changed,
}

fn classify(previous: Option<&str>, current: &str) -> Comparison {
    match previous {
        None => Comparison::FirstRun,
        Some(prev) if prev == current => Comparison::Unchanged,
        Some(_) => Comparison::Changed,
    }
}

/// The message posted to the webhook when a change is detected.
pub fn change_message(url: &str, detected_at: DateTime<Utc>) -> String {
    format!(
        "📢 Page content changed: {} (detected {})",
        url,
        detected_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Runs the fetch → hash → compare → notify → persist pipeline once.
pub struct ChangeChecker {
    fetcher: PageFetcher,
    notifier: WebhookNotifier,
    store: DigestStore,
}

impl ChangeChecker {
    pub fn new(fetcher: PageFetcher, notifier: WebhookNotifier, store: DigestStore) -> Self {
        Self {
            fetcher,
            notifier,
            store,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        Ok(Self::new(
            PageFetcher::new(&config.target_url, config.timeout_secs)?,
            WebhookNotifier::new(&config.webhook_url, config.timeout_secs)?,
            DigestStore::new(&config.state_file),
        ))
    }

    /// One complete run.
    ///
    /// Fetch and notify failures are logged and recovered here; only storage
    /// errors propagate, since losing the digest file breaks change tracking
    /// for every future run.
    pub fn run(&self) -> Result<RunOutcome> {
        info!(url = %self.fetcher.url(), "fetching page");
        let body = match self.fetcher.fetch() {
            Ok(body) => body,
            Err(err) => {
                warn!(stage = "fetch", error = %err, "fetch failed, recorded digest left untouched");
                return Ok(RunOutcome::FetchFailed);
            }
        };

        let current = content_digest(body.as_bytes());
        debug!(digest = %current, bytes = body.len(), "computed digest");

        let previous = self.store.load()?;
        match classify(previous.as_deref(), &current) {
            Comparison::FirstRun => {
                self.store.save(&current)?;
                info!(stage = "compare", digest = %current, "no recorded digest, tracking initialized");
                Ok(RunOutcome::FirstRun)
            }
            Comparison::Unchanged => {
                info!(stage = "compare", "no change detected");
                Ok(RunOutcome::Unchanged)
            }
            Comparison::Changed => {
                let message = change_message(self.fetcher.url(), Utc::now());
                if let Err(err) = self.notifier.send(&message) {
                    warn!(stage = "notify", error = %err, "webhook delivery failed, recording digest anyway");
                } else {
                    info!(stage = "notify", "change notification sent");
                }
                self.store.save(&current)?;
                info!(stage = "persist", digest = %current, "change detected, digest recorded");
                Ok(RunOutcome::Changed)
            }
        }
    }
}
