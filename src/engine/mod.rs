// ==========================================
// Container Scan Reconciliation - Engine Layer
// ==========================================
// Responsibility: business rules
// Rule: engines own orchestration, repositories own SQL
// ==========================================

pub mod normalizer;
pub mod reconcile;

pub use normalizer::CodeNormalizer;
pub use reconcile::{EngineError, EngineResult, ReconciliationEngine};
