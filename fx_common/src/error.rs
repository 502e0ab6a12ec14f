//! Error types shared between the relay server and the client.
//!
//! `ParseError` covers decoding the upstream quote payload and `ConfigError`
//! covers deadline budgets that can never be satisfied. Both are raised before
//! any persistence happens, so neither carries I/O state.
use std::time::Duration;

use thiserror::Error;

/// Failure while turning an upstream payload into a `QuoteRecord`.
///
/// There is only one kind: the record is rejected as a whole and nothing is
/// ever built from a partially valid payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The payload is not the expected JSON shape, or a field is missing or
    /// not a number in text form.
    #[error("Malformed quote payload: {0}")]
    Malformed(String),
}

impl ParseError {
    pub(crate) fn field(name: &str, value: &str, reason: impl std::fmt::Display) -> Self {
        ParseError::Malformed(format!("field {name} = {value:?}: {reason}"))
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Malformed(err.to_string())
    }
}

/// A deadline configuration that is structurally unable to succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The upstream and store timeouts do not fit inside the request budget.
    #[error(
        "Upstream timeout {upstream:?} plus two store timeouts of {store:?} must be less than the request budget {request:?}"
    )]
    BudgetExceeded {
        /// Overall time allowed for one acquisition.
        request: Duration,
        /// Time reserved for the upstream fetch.
        upstream: Duration,
        /// Time reserved for each ledger operation.
        store: Duration,
    },

    /// The client gives up before the server could possibly answer.
    #[error(
        "Client timeout {client:?} must exceed the server budget {server_budget:?} plus transport allowance {transport:?}"
    )]
    ClientTooShort {
        /// Outer deadline used by the client.
        client: Duration,
        /// Request budget the relay server works within.
        server_budget: Duration,
        /// Allowance for connection setup and round trip.
        transport: Duration,
    },

    /// A timeout of zero makes every call fail immediately.
    #[error("Timeout `{0}` must be greater than zero")]
    ZeroTimeout(&'static str),
}
