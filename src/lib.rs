// ==========================================
// Container Scan Reconciliation - Core Library
// ==========================================
// Tracks per (date, client) fulfillment counters against
// daily client orders, fed by noisy OCR container scans.
// Stack: Rust + SQLite
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - business rules
pub mod engine;

// Order store - read-only daily order files
pub mod order_store;

// Importer - external order-file conversion jobs
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / unified PRAGMA)
pub mod db;

// Logging
pub mod logging;

// API layer - boundary contracts
pub mod api;

// Application layer - wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

// Domain types
pub use domain::{ContainerCode, LedgerEntry, OrderLine, ScanEvent, ScanReceipt};

// Engines
pub use engine::{CodeNormalizer, ReconciliationEngine};

// Repositories
pub use repository::{FulfillmentLedgerRepository, ScanLogRepository};

// Order store
pub use order_store::{JsonFileOrderStore, OrderStore};

// API
pub use api::{ScanApi, ScanRequest, ScanResponse};

// ==========================================
// Constants
// ==========================================

// System version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "Container Scan Reconciliation";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
