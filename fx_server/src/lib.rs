//! FX quote relay server.
//!
//! The relay answers `GET /cotacao` with the current USD/BRL bid. Each request
//! runs the acquisition pipeline under a hard deadline:
//!
//! - `source`: `QuoteSource` and the `reqwest`-backed `HttpQuoteSource` issue one
//!   deadline-bounded request to the upstream provider.
//! - `ledger`: `Ledger` with `SqliteLedger` and `MemoryLedger`; quotes are unique by
//!   their upstream timestamp, enforced by the storage layer.
//! - `pipeline`: `AcquisitionPipeline` fetches, parses (via `fx_common::parser`),
//!   checks and inserts, and reports the bid with a persisted/duplicate status.
//! - `endpoint`: the `axum` router; pipeline errors become a bare `500`.
//! - `args`: `clap` configuration and the deadline budget validation.
//!
//! Concurrency: every inbound request is an independent tokio task. The ledger
//! is the only shared mutable resource and needs no in-process lock for
//! deduplication; the uniqueness constraint settles concurrent inserts.
#![warn(missing_docs)]
use std::future::Future;
use std::io;

use log::info;
use tokio::net::TcpListener;

pub mod args;
pub mod endpoint;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod result;
pub mod source;

pub use endpoint::{RelayState, create_router};
pub use error::{AcquireError, LedgerError, ServerError, SourceError};
pub use pipeline::{Acquisition, AcquisitionPipeline, PersistStatus};

/// Serve the relay on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: RelayState, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Relay endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
