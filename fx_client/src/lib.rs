//! Quote client: fetch the bid from the relay and append it to a local file.
//!
//! - `args`: `clap` configuration and the client/server deadline check.
//! - `fetch`: `RelayClient`, one deadline-bounded `GET /cotacao`.
//! - `recorder`: append-only `Dolar: <bid>` file.
//! - `error`: `ClientError`; any failure aborts the invocation before writing.
#![warn(missing_docs)]
use std::path::Path;
use std::time::Duration;

use tokio::time::Instant;

pub mod args;
pub mod error;
pub mod fetch;
pub mod recorder;

pub use error::ClientError;
pub use fetch::RelayClient;

/// Fetch one bid within `timeout` and append it to `output`.
///
/// Nothing is written unless the fetch succeeds.
pub async fn fetch_and_log(
    client: &RelayClient,
    output: &Path,
    timeout: Duration,
) -> Result<f64, ClientError> {
    let bid = client.fetch_bid(Instant::now() + timeout).await?;
    recorder::append_entry(output, bid).await?;
    Ok(bid)
}
