//! Page Change Monitor CLI
//!
//! Watch a single webpage for content changes and notify a chat webhook.

use anyhow::Result;
use clap::{Parser, Subcommand};
use page_change_monitor::{
    config::DEFAULT_STATE_FILE, ChangeChecker, ConfigOverrides, DigestStore, MonitorConfig,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pcm")]
#[command(about = "Page Change Monitor - notify a chat webhook when a webpage changes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the page once and notify the webhook if it changed
    Check {
        /// Page to monitor (overrides TARGET_URL)
        #[arg(long)]
        target_url: Option<String>,
        /// Timeout in seconds for each network call (overrides TIMEOUT_SECS)
        #[arg(long)]
        timeout: Option<u64>,
        /// File holding the digest of the previously seen content
        #[arg(long)]
        state_file: Option<PathBuf>,
    },
    /// Show the recorded digest without touching the network
    Status {
        /// File holding the digest of the previously seen content
        #[arg(long)]
        state_file: Option<PathBuf>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Log level is controlled via RUST_LOG, default info.
    // Example: RUST_LOG=debug pcm check
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("page_change_monitor=info,pcm=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run_command(cli.command) {
        // Storage and configuration problems are the only errors that reach
        // here; network trouble is recovered inside the checker with exit 0.
        error!(error = ?err, "run aborted");
        std::process::exit(2);
    }
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Check {
            target_url,
            timeout,
            state_file,
        } => {
            let config = MonitorConfig::load(ConfigOverrides {
                target_url,
                timeout_secs: timeout,
                state_file,
            })?;
            let checker = ChangeChecker::from_config(&config)?;
            let outcome = checker.run()?;
            info!(outcome = %outcome, "check finished");
            Ok(())
        }
        Commands::Status { state_file, json } => {
            let store = DigestStore::new(state_file.unwrap_or_else(|| DEFAULT_STATE_FILE.into()));
            let digest = store.load()?;
            if json {
                let value = serde_json::json!({
                    "state_file": store.path().display().to_string(),
                    "digest": digest,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                match digest {
                    Some(digest) => println!("recorded digest: {digest}"),
                    None => println!("no digest recorded at {}", store.path().display()),
                }
            }
            Ok(())
        }
    }
}
