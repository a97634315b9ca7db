// ==========================================
// Container Scan Reconciliation - Fulfillment Ledger Repository
// ==========================================
// Responsibility: the fulfillment_ledger table, one row per
// (scan_date, client). `apply` is the only write path and runs
// as an atomic read-modify-write inside a single transaction;
// the connection mutex linearizes concurrent applies so two
// simultaneous +1 scans always sum to +2.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::LedgerEntry;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct FulfillmentLedgerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FulfillmentLedgerRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_table()?;
        Ok(repo)
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Create the table if it does not exist
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS fulfillment_ledger (
              scan_date TEXT NOT NULL,
              client TEXT NOT NULL,
              scanned INTEGER NOT NULL DEFAULT 0,
              total INTEGER,
              created_at TEXT NOT NULL DEFAULT (datetime('now')),
              updated_at TEXT NOT NULL DEFAULT (datetime('now')),
              PRIMARY KEY (scan_date, client),
              CHECK (scanned >= 0)
            );

            CREATE INDEX IF NOT EXISTS idx_fulfillment_ledger_date
              ON fulfillment_ledger(scan_date);
            "#,
        )?;
        Ok(())
    }

    /// Find the counters for one (date, client) key
    pub fn get(&self, date: NaiveDate, client: &str) -> RepositoryResult<Option<LedgerEntry>> {
        let conn = self.get_conn()?;
        Self::select_entry(&conn, date, client)
    }

    /// Apply a signed quantity delta to one (date, client) key.
    ///
    /// Atomic read-modify-write:
    /// - absent key: created with `scanned = 0`, `total = order_total`,
    ///   then the delta is applied;
    /// - `scanned == 0` before a negative delta: rejected with
    ///   `InvalidUndo`, nothing written;
    /// - otherwise `scanned = max(0, scanned + delta)` (a decrement past
    ///   zero from a positive count clamps instead of rejecting).
    ///
    /// `order_total` is only consulted when the row is created; an
    /// existing row keeps the total copied at first write.
    pub fn apply(
        &self,
        date: NaiveDate,
        client: &str,
        delta: i64,
        order_total: Option<i64>,
    ) -> RepositoryResult<LedgerEntry> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let existing = Self::select_entry(&tx, date, client)?;
        let pre_scanned = existing.as_ref().map(|e| e.scanned).unwrap_or(0);

        if pre_scanned == 0 && delta < 0 {
            // rejected, not clamped: callers must not silently lose a failed undo
            return Err(RepositoryError::InvalidUndo {
                date: date.to_string(),
                client: client.to_string(),
            });
        }

        let entry = match existing {
            Some(mut entry) => {
                entry.scanned = (entry.scanned + delta).max(0);
                tx.execute(
                    r#"
                    UPDATE fulfillment_ledger
                    SET scanned = ?3, updated_at = datetime('now')
                    WHERE scan_date = ?1 AND client = ?2
                    "#,
                    params![date, client, entry.scanned],
                )?;
                entry
            }
            None => {
                let entry = LedgerEntry {
                    date,
                    client: client.to_string(),
                    scanned: delta.max(0),
                    total: order_total,
                };
                tx.execute(
                    r#"
                    INSERT INTO fulfillment_ledger (scan_date, client, scanned, total)
                    VALUES (?1, ?2, ?3, ?4)
                    "#,
                    params![date, client, entry.scanned, entry.total],
                )?;
                entry
            }
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(entry)
    }

    /// List all counters for one date (ordered by client)
    pub fn list_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<LedgerEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT scan_date, client, scanned, total
            FROM fulfillment_ledger
            WHERE scan_date = ?1
            ORDER BY client ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![date], |row| {
                Ok(LedgerEntry {
                    date: row.get(0)?,
                    client: row.get(1)?,
                    scanned: row.get(2)?,
                    total: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn select_entry(
        conn: &Connection,
        date: NaiveDate,
        client: &str,
    ) -> RepositoryResult<Option<LedgerEntry>> {
        let entry = conn
            .query_row(
                r#"
                SELECT scan_date, client, scanned, total
                FROM fulfillment_ledger
                WHERE scan_date = ?1 AND client = ?2
                "#,
                params![date, client],
                |row| {
                    Ok(LedgerEntry {
                        date: row.get(0)?,
                        client: row.get(1)?,
                        scanned: row.get(2)?,
                        total: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(entry)
    }
}
