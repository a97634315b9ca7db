// ==========================================
// Container Scan Reconciliation - Application State
// ==========================================
// Responsibility: application-level shared state and API instances.
// All repositories share one SQLite connection behind a mutex; that
// mutex is the serialization point that linearizes concurrent
// read-modify-writes on the ledger.
// ==========================================

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::api::ScanApi;
use crate::config::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::engine::{CodeNormalizer, ReconciliationEngine};
use crate::order_store::JsonFileOrderStore;
use crate::repository::{FulfillmentLedgerRepository, RepositoryResult, ScanLogRepository};

/// Application state
///
/// Holds the API instances and shared resources.
pub struct AppState {
    /// Database path
    pub db_path: String,

    /// Root of the per-date order file tree
    pub orders_dir: PathBuf,

    /// Scan API
    pub scan_api: Arc<ScanApi>,

    /// Configuration manager
    pub config: Arc<ConfigManager>,
}

impl AppState {
    pub fn new(db_path: &str, orders_dir: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let orders_dir = orders_dir.into();

        let conn: Arc<Mutex<Connection>> = Arc::new(Mutex::new(open_sqlite_connection(db_path)?));

        let config = Arc::new(ConfigManager::from_connection(conn.clone())?);
        let ledger_repo = Arc::new(FulfillmentLedgerRepository::from_connection(conn.clone())?);
        let scan_log_repo = Arc::new(ScanLogRepository::from_connection(conn.clone())?);

        let normalizer = CodeNormalizer::new(config.known_prefixes()?);
        let order_store = Arc::new(JsonFileOrderStore::new(orders_dir.clone()));

        let engine = Arc::new(ReconciliationEngine::new(
            normalizer,
            order_store,
            ledger_repo,
            scan_log_repo,
        ));

        Ok(Self {
            db_path: db_path.to_string(),
            orders_dir,
            scan_api: Arc::new(ScanApi::new(engine)),
            config,
        })
    }
}

/// Default database path
///
/// Overridable via SCAN_RECON_DB_PATH (debug/test/CI convenience);
/// otherwise lives under the user data directory.
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("SCAN_RECON_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./scan_recon.db");

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("scan-recon");
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join("scan_recon.db");
        }
    }

    path.to_string_lossy().into_owned()
}

/// Default orders directory (the conversion pipeline's output root)
///
/// Overridable via SCAN_RECON_ORDERS_DIR.
pub fn get_default_orders_dir() -> PathBuf {
    if let Ok(path) = std::env::var("SCAN_RECON_ORDERS_DIR") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    if let Some(data_dir) = dirs::data_dir() {
        return data_dir.join("scan-recon").join("output");
    }

    Path::new("./output").to_path_buf()
}
