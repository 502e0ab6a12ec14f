//! Command-line arguments for the relay server.
//!
//! Every flag can also be set through an `FX_*` environment variable. The
//! three timeouts are validated together by [`Args::budget`] before any socket
//! or database is opened.
use clap::Parser;
use fx_common::net::{self, REQUEST_TIMEOUT_MS, STORE_TIMEOUT_MS, UPSTREAM_TIMEOUT_MS};
use fx_common::{ConfigError, DeadlineBudget};

/// Parsed command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Relays the USD/BRL bid and stores each quote once", long_about = None)]
pub struct Args {
    /// Address the relay endpoint listens on.
    #[arg(long, env = "FX_LISTEN_ADDR", default_value_t = net::addr("0.0.0.0", net::RELAY_PORT))]
    pub listen_addr: String,

    /// Upstream quote provider URL.
    #[arg(long, env = "FX_UPSTREAM_URL", default_value = net::UPSTREAM_URL)]
    pub upstream_url: String,

    /// SQLite database URL of the ledger.
    #[arg(long, env = "FX_DATABASE_URL", default_value = "sqlite://exchange.db")]
    pub database_url: String,

    /// Overall budget of one acquisition, in milliseconds.
    #[arg(long, env = "FX_REQUEST_TIMEOUT_MS", default_value_t = REQUEST_TIMEOUT_MS)]
    pub request_timeout_ms: u64,

    /// Upstream fetch timeout, in milliseconds.
    #[arg(long, env = "FX_UPSTREAM_TIMEOUT_MS", default_value_t = UPSTREAM_TIMEOUT_MS)]
    pub upstream_timeout_ms: u64,

    /// Timeout of each ledger operation, in milliseconds.
    #[arg(long, env = "FX_STORE_TIMEOUT_MS", default_value_t = STORE_TIMEOUT_MS)]
    pub store_timeout_ms: u64,

    /// Size of the ledger connection pool.
    #[arg(long, env = "FX_MAX_CONNECTIONS", default_value_t = 4)]
    pub max_connections: u32,
}

impl Args {
    /// Validated deadline budget from the three timeout flags.
    pub fn budget(&self) -> Result<DeadlineBudget, ConfigError> {
        DeadlineBudget::from_millis(
            self.request_timeout_ms,
            self.upstream_timeout_ms,
            self.store_timeout_ms,
        )
    }
}
