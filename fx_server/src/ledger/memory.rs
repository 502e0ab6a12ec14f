//! In-memory ledger.
//!
//! Holds records in a `HashMap` keyed by timestamp behind a `parking_lot`
//! mutex. The map key plays the role of the storage uniqueness constraint:
//! `exists` and `insert_if_absent` lock separately, so two callers can both
//! see "absent" and then race on insert, exactly as with the SQLite ledger.
use std::collections::HashMap;

use async_trait::async_trait;
use fx_common::QuoteRecord;
use parking_lot::Mutex;
use tokio::time::Instant;

use super::{InsertOutcome, Ledger};
use crate::error::LedgerError;

/// Ledger kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    records: Mutex<HashMap<i64, QuoteRecord>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger that already holds `records`.
    pub fn with_records(records: impl IntoIterator<Item = QuoteRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.timestamp, r)).collect();
        Self {
            records: Mutex::new(records),
        }
    }

    /// Number of stored quotes.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether no quote is stored.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of the stored quote with `timestamp`, if any.
    pub fn get(&self, timestamp: i64) -> Option<QuoteRecord> {
        self.records.lock().get(&timestamp).cloned()
    }
}

fn check_deadline(deadline: Instant) -> Result<(), LedgerError> {
    if Instant::now() >= deadline {
        Err(LedgerError::Timeout)
    } else {
        Ok(())
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn exists(&self, timestamp: i64, deadline: Instant) -> Result<bool, LedgerError> {
        check_deadline(deadline)?;
        Ok(self.records.lock().contains_key(&timestamp))
    }

    async fn insert_if_absent(
        &self,
        record: &QuoteRecord,
        deadline: Instant,
    ) -> Result<InsertOutcome, LedgerError> {
        check_deadline(deadline)?;
        let mut records = self.records.lock();
        if records.contains_key(&record.timestamp) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        records.insert(record.timestamp, record.clone());
        Ok(InsertOutcome::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn record(timestamp: i64) -> QuoteRecord {
        QuoteRecord {
            code: "USD".into(),
            counter_code: "BRL".into(),
            name: "Dólar/Real".into(),
            high: Decimal::new(510, 2),
            low: Decimal::new(500, 2),
            var_bid: Decimal::new(1, 2),
            pct_change: Decimal::new(2, 1),
            bid: Decimal::new(505, 2),
            ask: Decimal::new(506, 2),
            timestamp,
            create_date: "2023-11-14 12:00:00".into(),
        }
    }

    fn soon() -> Instant {
        Instant::now() + Duration::from_secs(1)
    }

    #[tokio::test]
    async fn insert_then_exists() {
        let ledger = MemoryLedger::new();
        assert!(!ledger.exists(1000, soon()).await.unwrap());
        assert_eq!(
            ledger.insert_if_absent(&record(1000), soon()).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert!(ledger.exists(1000, soon()).await.unwrap());
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn second_insert_is_a_no_op() {
        let ledger = MemoryLedger::with_records([record(1000)]);
        let mut changed = record(1000);
        changed.bid = Decimal::new(999, 2);

        assert_eq!(
            ledger.insert_if_absent(&changed, soon()).await.unwrap(),
            InsertOutcome::AlreadyExists
        );
        assert_eq!(ledger.get(1000).unwrap().bid, Decimal::new(505, 2));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn expired_deadline_times_out() {
        let ledger = MemoryLedger::new();
        let past = Instant::now();
        assert_eq!(ledger.exists(1, past).await, Err(LedgerError::Timeout));
        assert_eq!(
            ledger.insert_if_absent(&record(1), past).await,
            Err(LedgerError::Timeout)
        );
        assert!(ledger.is_empty());
    }
}
