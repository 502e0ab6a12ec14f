//! SQLite ledger backed by an `sqlx` connection pool.
//!
//! Quotes live in a single `exchange_rates` table with a surrogate `id` and a
//! `UNIQUE` constraint on `timestamp`. Decimal columns hold the exact text the
//! provider sent, so nothing is lost to binary floating point.
//!
//! `insert_if_absent` is a plain `INSERT`. A racing duplicate is rejected by
//! the constraint and reported as `LedgerError::ConstraintViolation`; no
//! transaction spans the preceding `exists` check.
use std::future::Future;
use std::str::FromStr;

use async_trait::async_trait;
use fx_common::QuoteRecord;
use log::{debug, info};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tokio::time::{Instant, timeout_at};

use super::{InsertOutcome, Ledger};
use crate::error::LedgerError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS exchange_rates (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    code        TEXT    NOT NULL,
    codein      TEXT    NOT NULL,
    name        TEXT    NOT NULL,
    high        TEXT    NOT NULL,
    low         TEXT    NOT NULL,
    var_bid     TEXT    NOT NULL,
    pct_change  TEXT    NOT NULL,
    bid         TEXT    NOT NULL,
    ask         TEXT    NOT NULL,
    timestamp   INTEGER NOT NULL UNIQUE,
    create_date TEXT    NOT NULL
)
"#;

const EXISTS: &str = "SELECT COUNT(1) FROM exchange_rates WHERE timestamp = ?";

const INSERT: &str = r#"
INSERT INTO exchange_rates
    (code, codein, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date)
VALUES
    (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Ledger stored in an SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteLedger {
    pool: SqlitePool,
}

impl SqliteLedger {
    /// Open (creating if missing) the database at `url` and ensure the schema.
    ///
    /// `url` is an sqlx SQLite URL such as `sqlite://exchange.db`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, LedgerError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        let ledger = Self::from_pool(pool);
        ledger.migrate().await?;
        info!("Ledger opened at {}", url);
        Ok(ledger)
    }

    /// Wrap an existing pool. The schema is not touched.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `exchange_rates` table if it does not exist.
    pub async fn migrate(&self) -> Result<(), LedgerError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Total number of stored quotes.
    pub async fn count(&self) -> Result<i64, LedgerError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exchange_rates")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn bounded<T, F>(deadline: Instant, operation: F) -> Result<Result<T, sqlx::Error>, LedgerError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    timeout_at(deadline, operation)
        .await
        .map_err(|_| LedgerError::Timeout)
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn exists(&self, timestamp: i64, deadline: Instant) -> Result<bool, LedgerError> {
        let lookup = sqlx::query_scalar::<_, i64>(EXISTS)
            .bind(timestamp)
            .fetch_one(&self.pool);
        let count = bounded(deadline, lookup).await??;
        Ok(count > 0)
    }

    async fn insert_if_absent(
        &self,
        record: &QuoteRecord,
        deadline: Instant,
    ) -> Result<InsertOutcome, LedgerError> {
        let insert = sqlx::query(INSERT)
            .bind(record.code.as_str())
            .bind(record.counter_code.as_str())
            .bind(record.name.as_str())
            .bind(record.high.to_string())
            .bind(record.low.to_string())
            .bind(record.var_bid.to_string())
            .bind(record.pct_change.to_string())
            .bind(record.bid.to_string())
            .bind(record.ask.to_string())
            .bind(record.timestamp)
            .bind(record.create_date.as_str())
            .execute(&self.pool);

        match bounded(deadline, insert).await? {
            Ok(done) => {
                debug!(
                    "Stored quote {} (row {})",
                    record.timestamp,
                    done.last_insert_rowid()
                );
                Ok(InsertOutcome::Inserted)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(LedgerError::ConstraintViolation(record.timestamp))
            }
            Err(e) => Err(e.into()),
        }
    }
}
