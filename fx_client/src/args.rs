//! Command-line arguments for the quote client.
//!
//! This module defines the CLI interface using `clap`; every flag also reads an
//! `FX_*` environment variable. See `main` for end-to-end usage.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fx_common::deadline::ensure_client_headroom;
use fx_common::net::{self, CLIENT_TIMEOUT_MS, REQUEST_TIMEOUT_MS, TRANSPORT_ALLOWANCE_MS};
use fx_common::ConfigError;

/// Parsed command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Fetches the USD/BRL bid from the relay and appends it to a file", long_about = None)]
pub struct Args {
    /// Relay endpoint URL.
    #[arg(long, env = "FX_RELAY_URL", default_value_t = net::relay_url("localhost", net::RELAY_PORT))]
    pub url: String,

    /// File the bid line is appended to. Surrounding quotes are ignored.
    #[arg(long, env = "FX_OUTPUT", default_value = "cotacao.txt")]
    pub output: String,

    /// Outer deadline of the relay call, in milliseconds.
    #[arg(long, env = "FX_CLIENT_TIMEOUT_MS", default_value_t = CLIENT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Request budget the relay is configured with, in milliseconds.
    #[arg(long, env = "FX_SERVER_BUDGET_MS", default_value_t = REQUEST_TIMEOUT_MS)]
    pub server_budget_ms: u64,

    /// Allowance for connection setup and round trip, in milliseconds.
    #[arg(long, env = "FX_TRANSPORT_ALLOWANCE_MS", default_value_t = TRANSPORT_ALLOWANCE_MS)]
    pub transport_allowance_ms: u64,
}

impl Args {
    /// Client deadline, checked to outlast the relay's budget plus transport.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        let timeout = Duration::from_millis(self.timeout_ms);
        ensure_client_headroom(
            timeout,
            Duration::from_millis(self.server_budget_ms),
            Duration::from_millis(self.transport_allowance_ms),
        )?;
        Ok(timeout)
    }

    /// Output path with whitespace and matching quotes removed.
    pub fn output_path(&self) -> PathBuf {
        normalize_path(&self.output)
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
