// ==========================================
// Container Scan Reconciliation - Ledger Domain Model
// ==========================================
// LedgerEntry: the durable (scanned, total) counter pair per
// (date, client). Invariant: scanned never goes negative; it may
// transiently exceed total (over-scan is reported, not rejected).
// ==========================================

use crate::domain::container::ContainerCode;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Durable fulfillment counters for one (date, client) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub client: String,
    /// Units confirmed so far. Never negative.
    pub scanned: i64,
    /// Expected units, copied from the matching order line at first
    /// write. None when no order is on file ("unknown total").
    pub total: Option<i64>,
}

impl LedgerEntry {
    /// `total - scanned` when the total is known, else None
    /// (unknown total is treated as unbounded).
    pub fn remaining(&self) -> Option<i64> {
        self.total.map(|t| t - self.scanned)
    }
}

/// The engine's answer to one scan request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReceipt {
    /// The normalized code that was recorded.
    pub code: ContainerCode,
    pub scanned: i64,
    pub total: Option<i64>,
    pub remaining: Option<i64>,
}

impl ScanReceipt {
    pub fn from_entry(code: ContainerCode, entry: &LedgerEntry) -> Self {
        Self {
            code,
            scanned: entry.scanned,
            total: entry.total,
            remaining: entry.remaining(),
        }
    }
}

/// One append-only audit record of an applied scan, undo or finish
/// acknowledgement. Codes are recorded for audit only; they are never
/// matched against a manifest of expected containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanLogEntry {
    pub entry_id: String,
    pub date: NaiveDate,
    pub client: String,
    pub action: ScanAction,
    /// Normalized code, empty for finish acknowledgements.
    pub code: String,
    pub quantity_delta: i64,
    /// Counter value after the delta was applied (0 for finish).
    pub scanned_after: i64,
    pub recorded_at: NaiveDateTime,
}

impl ScanLogEntry {
    /// Create a new audit record (generates id and timestamp)
    pub fn new(
        date: NaiveDate,
        client: String,
        action: ScanAction,
        code: String,
        quantity_delta: i64,
        scanned_after: i64,
    ) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().to_string(),
            date,
            client,
            action,
            code,
            quantity_delta,
            scanned_after,
            recorded_at: chrono::Local::now().naive_local(),
        }
    }
}

/// Audit action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanAction {
    /// A positive quantity delta.
    Scan,
    /// A negative quantity delta (the undo convention).
    Undo,
    /// Operator marked the client as finished; no counter mutation.
    Finish,
}

impl ScanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanAction::Scan => "SCAN",
            ScanAction::Undo => "UNDO",
            ScanAction::Finish => "FINISH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SCAN" => Some(ScanAction::Scan),
            "UNDO" => Some(ScanAction::Undo),
            "FINISH" => Some(ScanAction::Finish),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(scanned: i64, total: Option<i64>) -> LedgerEntry {
        LedgerEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            client: "Acme".to_string(),
            scanned,
            total,
        }
    }

    #[test]
    fn test_remaining_with_known_total() {
        assert_eq!(entry(3, Some(10)).remaining(), Some(7));
        // over-scan reports a negative remaining instead of rejecting
        assert_eq!(entry(12, Some(10)).remaining(), Some(-2));
    }

    #[test]
    fn test_remaining_with_unknown_total() {
        assert_eq!(entry(5, None).remaining(), None);
    }

    #[test]
    fn test_scan_action_round_trip() {
        for action in [ScanAction::Scan, ScanAction::Undo, ScanAction::Finish] {
            assert_eq!(ScanAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(ScanAction::parse("OTHER"), None);
    }
}
