//! Acquisition pipeline: fetch, decode and idempotently store one quote.
//!
//! One call of [`AcquisitionPipeline::acquire`] runs the whole chain under a
//! single outer deadline:
//!
//! 1. fetch the raw payload with a deadline that leaves the store budget free;
//! 2. parse it (a malformed payload stops here and is never stored);
//! 3. ask the ledger whether the timestamp is already stored, and stop with
//!    the store error if that cannot be answered;
//! 4. insert if absent, counting a lost race as a duplicate;
//! 5. return the bid whether or not this call wrote it.
//!
//! The pipeline holds no cache. Two calls inside the same upstream refresh
//! interval both hit the provider, and the second one finds the stored quote.
use std::sync::Arc;
use std::time::Duration;

use fx_common::{ConfigError, DeadlineBudget, parser};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use strum_macros::Display;
use tokio::time::Instant;

use crate::error::{AcquireError, LedgerError};
use crate::ledger::{InsertOutcome, Ledger};
use crate::source::QuoteSource;

/// Whether an acquisition wrote the quote or found it already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PersistStatus {
    /// This call stored the quote.
    Persisted,
    /// The quote was stored before, possibly by a concurrent call.
    Duplicate,
}

/// Successful outcome of one acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquisition {
    /// Bid of the fetched quote.
    pub bid: Decimal,
    /// Natural key of the fetched quote.
    pub timestamp: i64,
    /// Whether this call performed the write.
    pub status: PersistStatus,
}

/// Composes a quote source and a ledger under a deadline budget.
pub struct AcquisitionPipeline {
    source: Arc<dyn QuoteSource>,
    ledger: Arc<dyn Ledger>,
    budget: DeadlineBudget,
}

impl AcquisitionPipeline {
    /// Build a pipeline from an already validated budget.
    pub fn new(source: Arc<dyn QuoteSource>, ledger: Arc<dyn Ledger>, budget: DeadlineBudget) -> Self {
        Self {
            source,
            ledger,
            budget,
        }
    }

    /// Build a pipeline from raw timeouts.
    ///
    /// Fails with `ConfigError` unless `upstream + 2 * store < request`, since such
    /// a pipeline could never finish inside its own budget.
    pub fn with_timeouts(
        source: Arc<dyn QuoteSource>,
        ledger: Arc<dyn Ledger>,
        request: Duration,
        upstream: Duration,
        store: Duration,
    ) -> Result<Self, ConfigError> {
        let budget = DeadlineBudget::new(request, upstream, store)?;
        Ok(Self::new(source, ledger, budget))
    }

    /// Budget this pipeline runs with.
    pub fn budget(&self) -> DeadlineBudget {
        self.budget
    }

    /// Run one acquisition with the outer deadline taken from the budget.
    pub async fn acquire_now(&self) -> Result<Acquisition, AcquireError> {
        self.acquire(self.budget.outer_deadline(Instant::now())).await
    }

    /// Run one acquisition that must finish by `outer`.
    pub async fn acquire(&self, outer: Instant) -> Result<Acquisition, AcquireError> {
        let upstream_deadline = self.budget.upstream_deadline(Instant::now(), outer);
        let payload = self.source.fetch(upstream_deadline).await?;

        let record = parser::parse(&payload).inspect_err(|_| {
            warn!("Rejected upstream payload: {}", payload.to_text());
        })?;
        debug!("Parsed quote {} bid={}", record.timestamp, record.bid);

        let stored = self
            .ledger
            .exists(record.timestamp, self.budget.store_deadline(Instant::now(), outer))
            .await
            .map_err(store_error)?;

        let status = if stored {
            PersistStatus::Duplicate
        } else {
            let deadline = self.budget.store_deadline(Instant::now(), outer);
            match self.ledger.insert_if_absent(&record, deadline).await {
                Ok(InsertOutcome::Inserted) => PersistStatus::Persisted,
                Ok(InsertOutcome::AlreadyExists) => PersistStatus::Duplicate,
                Err(LedgerError::ConstraintViolation(timestamp)) => {
                    debug!("Lost insert race for quote {}", timestamp);
                    PersistStatus::Duplicate
                }
                Err(e) => return Err(store_error(e)),
            }
        };

        info!(
            "Acquired quote {} bid={} ({})",
            record.timestamp, record.bid, status
        );
        Ok(Acquisition {
            bid: record.bid,
            timestamp: record.timestamp,
            status,
        })
    }
}

fn store_error(err: LedgerError) -> AcquireError {
    match err {
        LedgerError::Timeout => AcquireError::StoreTimeout,
        LedgerError::StoreUnavailable(cause) => AcquireError::StoreUnavailable(cause),
        LedgerError::ConstraintViolation(timestamp) => AcquireError::StoreUnavailable(format!(
            "unexpected constraint violation for {}",
            timestamp
        )),
    }
}
