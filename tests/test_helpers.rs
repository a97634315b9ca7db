// ==========================================
// Shared integration-test fixtures
// ==========================================

// not every test binary uses every helper
#![allow(dead_code)]

use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Create a temp SQLite database file, returning the guard and path.
/// The guard must stay alive for the duration of the test.
pub fn create_test_db() -> (NamedTempFile, String) {
    let file = NamedTempFile::new().expect("Failed to create temp db file");
    let path = file.path().to_string_lossy().into_owned();
    (file, path)
}

/// Create a temp orders directory tree.
pub fn create_orders_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp orders dir")
}

/// Write `<orders_dir>/<date>/data.json` with the given rows.
pub fn write_order_file(orders_dir: &Path, date: &str, rows: &serde_json::Value) {
    let day_dir = orders_dir.join(date);
    std::fs::create_dir_all(&day_dir).expect("Failed to create order day dir");
    std::fs::write(
        day_dir.join("data.json"),
        serde_json::to_string_pretty(rows).expect("Failed to serialize order rows"),
    )
    .expect("Failed to write order file");
}
