// ==========================================
// Container Scan Reconciliation - Configuration Manager
// ==========================================
// Responsibility: configuration load / query / override
// Storage: config_kv table (key-value, scope_id = 'global')
// The known-prefix table lives here: adding a carrier prefix is
// a configuration change, not a code change.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// Known 4-letter carrier prefixes, in correction priority order.
///
/// Seeded into config_kv on first start; the stored list wins after
/// that. Order matters: the normalizer takes the first suffix match.
pub const DEFAULT_KNOWN_PREFIXES: &[&str] = &[
    "SUDU", "MNBU", "MSKU", "TCLU", "TEMU", "FCIU", "TRHU", "CAIU",
];

const KNOWN_PREFIXES_KEY: &str = "known_prefixes";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_table()?;
        Ok(manager)
    }

    /// Build from an existing connection.
    ///
    /// Re-applies the unified PRAGMA set to the passed connection so
    /// behavior stays consistent (idempotent).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
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
            CREATE TABLE IF NOT EXISTS config_kv (
              scope_id TEXT NOT NULL DEFAULT 'global',
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL DEFAULT (datetime('now')),
              PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    /// Read a config value from config_kv (scope_id='global')
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a config value (upsert, scope_id='global')
    fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// The known-prefix list in correction priority order.
    ///
    /// Falls back to `DEFAULT_KNOWN_PREFIXES` when the key is absent;
    /// a stored but malformed value is a field error, not a silent
    /// fallback.
    pub fn known_prefixes(&self) -> RepositoryResult<Vec<String>> {
        match self.get_config_value(KNOWN_PREFIXES_KEY)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| RepositoryError::FieldValueError {
                    field: KNOWN_PREFIXES_KEY.to_string(),
                    message: e.to_string(),
                })
            }
            None => Ok(DEFAULT_KNOWN_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect()),
        }
    }

    /// Replace the known-prefix list
    pub fn set_known_prefixes(&self, prefixes: &[String]) -> RepositoryResult<()> {
        let raw = serde_json::to_string(prefixes).map_err(|e| {
            RepositoryError::FieldValueError {
                field: KNOWN_PREFIXES_KEY.to_string(),
                message: e.to_string(),
            }
        })?;
        self.set_config_value(KNOWN_PREFIXES_KEY, &raw)
    }
}
