//! Error types used across the quote client.
//!
//! Every variant is fatal for the invocation: the client either appends one
//! complete line or nothing at all.
use std::io;

use fx_common::ConfigError;
use thiserror::Error;

/// Unified error type for the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Deadlines that cannot work together with the relay's budget.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The relay did not answer before the client's deadline.
    #[error("Relay did not answer before the deadline")]
    Timeout,

    /// Connection-level failure talking to the relay.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The relay answered with a non-success status.
    #[error("Relay answered with status {0}")]
    BadStatus(u16),

    /// The relay body is not a `{"Bid": <number>}` object.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The output file could not be opened or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
