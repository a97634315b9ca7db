// ==========================================
// Container Scan Reconciliation - Scan Log Repository
// ==========================================
// Responsibility: the scan_log table, an append-only audit trail
// of every applied scan/undo plus finish acknowledgements.
// Audit only: nothing in the system reads these rows to make
// decisions, and the engine never deletes them.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::ledger::{ScanAction, ScanLogEntry};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
pub struct ScanLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScanLogRepository {
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

    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS scan_log (
              entry_id TEXT PRIMARY KEY,
              scan_date TEXT NOT NULL,
              client TEXT NOT NULL,
              action TEXT NOT NULL,
              code TEXT NOT NULL,
              quantity_delta INTEGER NOT NULL,
              scanned_after INTEGER NOT NULL,
              recorded_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_scan_log_date_client
              ON scan_log(scan_date, client);
            CREATE INDEX IF NOT EXISTS idx_scan_log_recorded_at
              ON scan_log(recorded_at DESC);
            "#,
        )?;
        Ok(())
    }

    /// Append one audit record
    pub fn append(&self, entry: &ScanLogEntry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO scan_log (
                entry_id,
                scan_date,
                client,
                action,
                code,
                quantity_delta,
                scanned_after,
                recorded_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                entry.entry_id,
                entry.date,
                entry.client,
                entry.action.as_str(),
                entry.code,
                entry.quantity_delta,
                entry.scanned_after,
                entry.recorded_at,
            ],
        )?;
        Ok(())
    }

    /// List audit records for one (date, client), newest first
    pub fn list_by_key(
        &self,
        date: NaiveDate,
        client: &str,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<ScanLogEntry>> {
        let conn = self.get_conn()?;

        let sql = format!(
            r#"
            SELECT entry_id, scan_date, client, action, code,
                   quantity_delta, scanned_after, recorded_at
            FROM scan_log
            WHERE scan_date = ?1 AND client = ?2
            ORDER BY recorded_at DESC, entry_id DESC
            {}
            "#,
            match limit {
                Some(n) => format!("LIMIT {}", n),
                None => String::new(),
            }
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![date, client], Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScanLogEntry> {
        let action_raw: String = row.get(3)?;
        let action = ScanAction::parse(&action_raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("unknown scan action: {}", action_raw).into(),
            )
        })?;

        Ok(ScanLogEntry {
            entry_id: row.get(0)?,
            date: row.get(1)?,
            client: row.get(2)?,
            action,
            code: row.get(4)?,
            quantity_delta: row.get(5)?,
            scanned_after: row.get(6)?,
            recorded_at: row.get(7)?,
        })
    }
}
