//! Quote Client: fetches the current USD/BRL bid from the relay and appends a
//! `Dolar: <bid>` line to a local file, creating it if needed.
//!
//! Usage example (CLI):
//! ```bash
//! fx_client --url http://localhost:8080/cotacao --output ./cotacao.txt --timeout-ms 300
//! ```
//!
//! The client refuses to start when `--timeout-ms` does not exceed the relay's
//! budget plus the transport allowance, since such a client would time out even
//! when the relay succeeds.
#![warn(missing_docs)]
use clap::Parser;
use fx_client::args::Args;
use fx_client::{ClientError, RelayClient, fetch_and_log};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    init_logger();
    let args = Args::parse();
    let timeout = args.timeout()?;
    let output = args.output_path();
    let client = RelayClient::new(&args.url)?;

    info!("Requesting bid from {} (deadline {:?})", client.url(), timeout);
    match fetch_and_log(&client, &output, timeout).await {
        Ok(bid) => {
            info!("Dolar: {:.6} appended to {}", bid, output.display());
            Ok(())
        }
        Err(e) => {
            error!("Quote fetch failed: {}", e);
            Err(e)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
