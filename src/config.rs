//! Run configuration
//!
//! Resolution order for every option: CLI flag, then environment variable,
//! then built-in default. The webhook URL is a secret and only ever comes
//! from the environment.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Page monitored when neither `--target-url` nor `TARGET_URL` is set.
pub const DEFAULT_TARGET_URL: &str = "https://ucsd-cse25.github.io/schedule/";

/// Digest file default, relative on purpose: the scheduler checks it out and
/// commits it back next to the workflow that invokes us.
pub const DEFAULT_STATE_FILE: &str = "last_hash.txt";

/// Bound on each of the two network calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values the CLI may force over environment and defaults.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub target_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub state_file: Option<PathBuf>,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub target_url: String,
    pub webhook_url: String,
    pub timeout_secs: u64,
    pub state_file: PathBuf,
}

impl MonitorConfig {
    /// Resolves configuration from CLI overrides and the process environment.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let webhook_url = match env("WEBHOOK_URL") {
            Some(url) if !url.trim().is_empty() => url,
            _ => bail!("WEBHOOK_URL environment variable not set"),
        };

        let target_url = overrides
            .target_url
            .or_else(|| env("TARGET_URL"))
            .unwrap_or_else(|| DEFAULT_TARGET_URL.to_string());

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match env("TIMEOUT_SECS") {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("invalid TIMEOUT_SECS value: {raw:?}"))?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            bail!("timeout must be at least 1 second");
        }

        let state_file = overrides
            .state_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));

        Ok(Self {
            target_url,
            webhook_url,
            timeout_secs,
            state_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_apply_when_only_webhook_is_set() {
        let env = env_with(&[("WEBHOOK_URL", "https://hooks.example/abc")]);
        let config = MonitorConfig::resolve(ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.target_url, DEFAULT_TARGET_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(config.webhook_url, "https://hooks.example/abc");
    }

    #[test]
    fn missing_webhook_url_is_an_error() {
        let env = env_with(&[]);
        let err = MonitorConfig::resolve(ConfigOverrides::default(), env).unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_URL"));
    }

    #[test]
    fn blank_webhook_url_is_an_error() {
        let env = env_with(&[("WEBHOOK_URL", "  ")]);
        assert!(MonitorConfig::resolve(ConfigOverrides::default(), env).is_err());
    }

    #[test]
    fn cli_overrides_beat_environment() {
        let env = env_with(&[
            ("WEBHOOK_URL", "https://hooks.example/abc"),
            ("TARGET_URL", "https://env.example/page"),
            ("TIMEOUT_SECS", "10"),
        ]);
        let overrides = ConfigOverrides {
            target_url: Some("https://cli.example/page".to_string()),
            timeout_secs: Some(5),
            state_file: Some(PathBuf::from("/tmp/hash.txt")),
        };
        let config = MonitorConfig::resolve(overrides, env).unwrap();
        assert_eq!(config.target_url, "https://cli.example/page");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.state_file, PathBuf::from("/tmp/hash.txt"));
    }

    #[test]
    fn environment_target_and_timeout_are_honored() {
        let env = env_with(&[
            ("WEBHOOK_URL", "https://hooks.example/abc"),
            ("TARGET_URL", "https://env.example/page"),
            ("TIMEOUT_SECS", "12"),
        ]);
        let config = MonitorConfig::resolve(ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.target_url, "https://env.example/page");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn non_numeric_timeout_is_an_error() {
        let env = env_with(&[
            ("WEBHOOK_URL", "https://hooks.example/abc"),
            ("TIMEOUT_SECS", "soon"),
        ]);
        let err = MonitorConfig::resolve(ConfigOverrides::default(), env).unwrap_err();
        assert!(err.to_string().contains("TIMEOUT_SECS"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let env = env_with(&[("WEBHOOK_URL", "https://hooks.example/abc")]);
        let overrides = ConfigOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(MonitorConfig::resolve(overrides, env).is_err());
    }
}
