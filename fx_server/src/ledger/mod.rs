//! Idempotent persistence of quotes keyed by their upstream timestamp.
//!
//! The ledger exposes two separately bounded operations instead of one atomic
//! upsert:
//!
//! - `exists(timestamp, deadline)`: point lookup by natural key.
//! - `insert_if_absent(record, deadline)`: store the record unless the key is
//!   already present.
//!
//! Between the two calls another request may store the same timestamp. The
//! storage layer's uniqueness constraint settles that race: the loser gets
//! `InsertOutcome::AlreadyExists` or `LedgerError::ConstraintViolation`, and
//! the pipeline treats both as "already stored". There is no in-process lock
//! around the pair of calls.
//!
//! Implementations:
//! - `sqlite`: `SqliteLedger`, the production store.
//! - `memory`: `MemoryLedger`, a map behind a mutex for tests and embedding.
use async_trait::async_trait;
use fx_common::QuoteRecord;
use tokio::time::Instant;

use crate::error::LedgerError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;

/// Result of a successful `insert_if_absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This call stored the record.
    Inserted,
    /// A record with the same timestamp was already stored; nothing changed.
    AlreadyExists,
}

/// Persistent store of quotes, unique by `timestamp`.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Whether a quote with `timestamp` is stored.
    async fn exists(&self, timestamp: i64, deadline: Instant) -> Result<bool, LedgerError>;

    /// Store `record` unless its timestamp is already present.
    async fn insert_if_absent(
        &self,
        record: &QuoteRecord,
        deadline: Instant,
    ) -> Result<InsertOutcome, LedgerError>;
}
