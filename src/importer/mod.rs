// ==========================================
// Container Scan Reconciliation - Importer Layer
// ==========================================
// Responsibility: submit the external conversion job that turns
// uploaded daily order files into <orders_dir>/<date>/data.json.
// The reconciliation core never depends on this layer; it only
// reads whatever files the conversion produced.
// ==========================================

pub mod converter;
pub mod error;

pub use converter::{stage_and_convert, CommandConverter, OrderFileConverter};
pub use error::{ImporterError, ImporterResult};
