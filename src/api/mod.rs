// ==========================================
// Container Scan Reconciliation - API Layer
// ==========================================
// Responsibility: boundary request/response shapes, input parsing,
// user-facing error mapping. No operation may panic past here.
// ==========================================

pub mod error;
pub mod scan_api;

pub use error::{ApiError, ApiResult};
pub use scan_api::{FinishResponse, ScanApi, ScanRequest, ScanResponse};
