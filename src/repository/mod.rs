// ==========================================
// Container Scan Reconciliation - Repository Layer
// ==========================================
// Responsibility: data access only, no business rules
// Constraint: all queries are parameterized
// ==========================================

pub mod error;
pub mod ledger_repo;
pub mod scan_log_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use ledger_repo::FulfillmentLedgerRepository;
pub use scan_log_repo::ScanLogRepository;
