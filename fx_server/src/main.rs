//! FX quote relay binary.
//!
//! Startup order:
//! - parse `Args` and validate the deadline budget (fails fast on a budget the
//!   pipeline could never meet);
//! - open the SQLite ledger and create the schema if needed;
//! - build the upstream HTTP source and the acquisition pipeline;
//! - serve `GET /cotacao` until Ctrl+C.
//!
//! Errors during startup are returned from `main`; errors while serving a
//! request are logged by the endpoint and answered with `500`.
#![warn(missing_docs)]
use std::sync::Arc;

use clap::Parser;
use fx_server::args::Args;
use fx_server::ledger::SqliteLedger;
use fx_server::result::Result;
use fx_server::source::HttpQuoteSource;
use fx_server::{AcquisitionPipeline, RelayState};
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let budget = args.budget()?;
    info!(
        "Deadline budget: request={:?} upstream={:?} store={:?}",
        budget.request(),
        budget.upstream(),
        budget.store()
    );

    let ledger = SqliteLedger::connect(&args.database_url, args.max_connections).await?;
    info!("Ledger holds {} quotes", ledger.count().await?);

    let source = HttpQuoteSource::new(&args.upstream_url)?;
    info!("Upstream provider: {}", source.url());

    let pipeline = AcquisitionPipeline::new(Arc::new(source), Arc::new(ledger), budget);
    let listener = TcpListener::bind(&args.listen_addr).await?;
    fx_server::serve(listener, RelayState::new(pipeline), shutdown_signal()).await?;
    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received. Shutting down relay...");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
