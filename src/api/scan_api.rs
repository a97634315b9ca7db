// ==========================================
// Container Scan Reconciliation - Scan API
// ==========================================
// Responsibility: the inbound boundary for scanner clients.
// Shapes:
//   scan:   {date, client, container, qty} ->
//           {message, code, scanned, total|null, remaining|null}
//   orders: {date} -> distinct client names ([] when no order file)
//   finish: {client} -> acknowledgement
// Negative qty is the undo convention.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::ScanEvent;
use crate::engine::ReconciliationEngine;

// ==========================================
// Boundary DTOs
// ==========================================

/// One inbound scan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Calendar date, "YYYY-MM-DD".
    pub date: String,
    pub client: String,
    /// Raw container code as scanned/typed; normalized server-side.
    pub container: String,
    /// Signed quantity delta; negative undoes a previous scan.
    pub qty: i64,
}

/// Successful scan outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub message: String,
    /// Normalized container code that was recorded.
    pub code: String,
    pub scanned: i64,
    pub total: Option<i64>,
    pub remaining: Option<i64>,
}

/// Finish acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishResponse {
    pub ok: bool,
}

// ==========================================
// ScanApi
// ==========================================

pub struct ScanApi {
    engine: Arc<ReconciliationEngine>,
}

impl ScanApi {
    pub fn new(engine: Arc<ReconciliationEngine>) -> Self {
        Self { engine }
    }

    /// Process one scan request.
    ///
    /// Validation order: malformed date, then empty client, then zero
    /// delta; all rejected before any state mutation.
    pub fn scan(&self, request: &ScanRequest) -> ApiResult<ScanResponse> {
        let date = parse_date(&request.date)?;

        let event = ScanEvent::new(
            date,
            request.client.clone(),
            request.container.clone(),
            request.qty,
        );
        let receipt = self.engine.scan(&event)?;

        let message = if request.qty > 0 {
            format!("Added {}", request.qty)
        } else {
            format!("Removed {}", -request.qty)
        };

        Ok(ScanResponse {
            message,
            code: receipt.code.into_inner(),
            scanned: receipt.scanned,
            total: receipt.total,
            remaining: receipt.remaining,
        })
    }

    /// Distinct client names with an order on `date`.
    ///
    /// An absent order file answers an empty list, not an error.
    pub fn list_clients(&self, date: &str) -> ApiResult<Vec<String>> {
        let date = parse_date(date)?;
        let clients = self.engine.list_clients(date);
        debug!(date = %date, count = clients.len(), "listed order clients");
        Ok(clients)
    }

    /// Acknowledge a finished client. No ledger mutation.
    pub fn finish(&self, client: &str) -> ApiResult<FinishResponse> {
        self.engine.finish(client)?;
        Ok(FinishResponse { ok: true })
    }
}

fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::InvalidInput(format!("malformed date: {:?}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-05-01").is_ok());
        for bad in ["", "2024-13-01", "2024-02-30", "01.05.2024", "today"] {
            assert!(
                matches!(parse_date(bad), Err(ApiError::InvalidInput(_))),
                "expected rejection for {:?}",
                bad
            );
        }
    }
}
