//! Page Change Monitor - watch a single webpage and notify a chat webhook on change

pub mod checker;
pub mod config;
pub mod digest;
pub mod fetch;
pub mod notify;
pub mod state;

pub use checker::{change_message, ChangeChecker, RunOutcome};
pub use config::{ConfigOverrides, MonitorConfig};
pub use digest::content_digest;
pub use fetch::{FetchError, PageFetcher};
pub use notify::{NotifyError, WebhookNotifier};
pub use state::DigestStore;
