// ==========================================
// Container Scan Reconciliation - Application Layer
// ==========================================
// Responsibility: wire repositories, engines and APIs together
// ==========================================

pub mod state;

// Re-export
pub use state::{get_default_db_path, get_default_orders_dir, AppState};
