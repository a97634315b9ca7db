// ==========================================
// Container Scan Reconciliation - Configuration Layer
// ==========================================

pub mod config_manager;

pub use config_manager::{ConfigManager, DEFAULT_KNOWN_PREFIXES};
