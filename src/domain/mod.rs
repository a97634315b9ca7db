// ==========================================
// Container Scan Reconciliation - Domain Layer
// ==========================================
// Responsibility: entities and value types only
// Rule: no data access, no engine logic
// ==========================================

pub mod container;
pub mod ledger;
pub mod order;

// Re-export core types
pub use container::ContainerCode;
pub use ledger::{LedgerEntry, ScanLogEntry, ScanReceipt};
pub use order::{OrderLine, ScanEvent};
