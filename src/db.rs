// ==========================================
// SQLite connection initialization
// ==========================================
// Goals:
// - one place for Connection::open PRAGMA behavior, so every
//   repository gets identical foreign-key and timeout settings
// - unified busy_timeout to absorb transient lock contention
//   from concurrent scan requests
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMA set to a connection
///
/// foreign_keys and busy_timeout are per-connection settings and
/// must be re-applied for every connection that is opened.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}
