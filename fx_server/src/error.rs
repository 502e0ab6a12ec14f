//! Error types used across the relay server.
//!
//! Each stage owns its error enum: `SourceError` for the upstream fetch,
//! `LedgerError` for storage, and `AcquireError` for the pipeline that
//! composes them. `ServerError` covers startup. Stages never retry; a failure
//! travels upward unchanged in kind, and only the pipeline reinterprets one
//! (a constraint violation on insert counts as a duplicate).
use std::io;

use fx_common::{ConfigError, ParseError};
use thiserror::Error;

/// Failure of the single outbound request to the quote provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The deadline passed before the full response was read.
    #[error("Upstream deadline elapsed")]
    Timeout,

    /// Connection-level failure unrelated to the deadline.
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a non-success status.
    #[error("Upstream answered with status {0}")]
    BadStatus(u16),
}

/// Failure of a ledger operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The operation did not finish before its deadline.
    #[error("Ledger deadline elapsed")]
    Timeout,

    /// The store could not be reached or rejected the statement.
    #[error("Ledger unavailable: {0}")]
    StoreUnavailable(String),

    /// The uniqueness constraint on the timestamp rejected an insert.
    #[error("A quote with timestamp {0} is already stored")]
    ConstraintViolation(i64),
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::StoreUnavailable(err.to_string())
    }
}

/// Classified failure of one acquisition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    /// The upstream fetch ran out of time.
    #[error("Upstream timeout")]
    UpstreamTimeout,

    /// The upstream provider could not be reached.
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The upstream provider answered with a non-success status.
    #[error("Upstream bad status: {0}")]
    UpstreamBadStatus(u16),

    /// The upstream payload could not be decoded. Nothing was stored.
    #[error(transparent)]
    Malformed(#[from] ParseError),

    /// The ledger could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A ledger operation ran out of time.
    #[error("Store timeout")]
    StoreTimeout,
}

impl From<SourceError> for AcquireError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Timeout => AcquireError::UpstreamTimeout,
            SourceError::Unreachable(cause) => AcquireError::UpstreamUnreachable(cause),
            SourceError::BadStatus(status) => AcquireError::UpstreamBadStatus(status),
        }
    }
}

/// Errors that stop the relay from starting or serving.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Deadline budget that can never be met.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Socket or file error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The ledger could not be opened or migrated.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// The HTTP client for the upstream provider could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
