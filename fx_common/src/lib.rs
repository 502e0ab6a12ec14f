//!
//! Common types and utilities shared by the FX relay server and client.
//!
//! This crate aggregates:
//! - `error`: `ParseError` for payload decoding and `ConfigError` for deadline budgets.
//! - `quote`: the `QuoteRecord` entity, `RawPayload` and the `BidResponse` wire body.
//! - `parser`: pure decoding of the upstream provider payload.
//! - `deadline`: deadline budget split and the client/server headroom check.
//! - `net`: networking constants, default timeouts and small helpers.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod parser;
pub mod quote;

pub use deadline::DeadlineBudget;
pub use error::{ConfigError, ParseError};
pub use quote::{BidResponse, QuoteRecord, RawPayload};
