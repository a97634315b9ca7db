// ==========================================
// Container Scan Reconciliation - Order Domain Model
// ==========================================
// OrderLine: expected units per (date, client), immutable once
// loaded for a date. Sourced from the external daily order file.
// ScanEvent: one reported observation, consumed once by the engine.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One expected-total line from the daily order file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub date: NaiveDate,
    pub client: String,
    /// Expected units, non-negative.
    pub total: i64,
}

/// One scan observation.
///
/// Ephemeral: created by the caller per request, consumed once by the
/// engine, never persisted as-is. The "last scan" slot used for undo is
/// caller-held session state, not engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub date: NaiveDate,
    pub client: String,
    pub raw_code: String,
    /// Signed quantity contribution; negative is the undo convention.
    pub quantity_delta: i64,
}

impl ScanEvent {
    pub fn new(date: NaiveDate, client: String, raw_code: String, quantity_delta: i64) -> Self {
        Self {
            date,
            client,
            raw_code,
            quantity_delta,
        }
    }

    /// The equal-and-opposite event that reverses this one.
    pub fn inverse(&self) -> Self {
        Self {
            quantity_delta: -self.quantity_delta,
            ..self.clone()
        }
    }
}
