// ==========================================
// Container Scan Reconciliation - Reconciliation Engine
// ==========================================
// Orchestration for one scan request:
//   normalize code -> look up order total -> apply delta to the
//   ledger -> append audit record -> build receipt
//
// The engine is stateless across calls; the only durable state is
// the ledger. Undo is a second scan with the previous delta negated,
// and the "last scan" slot lives with the caller, not here.
// ==========================================

use crate::domain::ledger::{ScanAction, ScanLogEntry};
use crate::domain::{ScanEvent, ScanReceipt};
use crate::engine::normalizer::CodeNormalizer;
use crate::order_store::OrderStore;
use crate::repository::{FulfillmentLedgerRepository, RepositoryError, ScanLogRepository};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Engine layer error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// Rejected before any state mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type alias
pub type EngineResult<T> = Result<T, EngineError>;

pub struct ReconciliationEngine {
    normalizer: CodeNormalizer,
    order_store: Arc<dyn OrderStore>,
    ledger_repo: Arc<FulfillmentLedgerRepository>,
    scan_log_repo: Arc<ScanLogRepository>,
}

impl ReconciliationEngine {
    pub fn new(
        normalizer: CodeNormalizer,
        order_store: Arc<dyn OrderStore>,
        ledger_repo: Arc<FulfillmentLedgerRepository>,
        scan_log_repo: Arc<ScanLogRepository>,
    ) -> Self {
        Self {
            normalizer,
            order_store,
            ledger_repo,
            scan_log_repo,
        }
    }

    /// Process one scan event and return the updated counters.
    ///
    /// Validation order: empty client, then zero delta; both rejected
    /// before any mutation. The container code is normalized (never
    /// fails) and recorded for audit, but it is NOT matched against a
    /// manifest of expected codes: the system tracks aggregate counts
    /// per client, so duplicate or unrelated codes count identically.
    ///
    /// NOT idempotent: re-running the same event after a storage
    /// failure of unknown outcome can double-count. Callers needing
    /// exactly-once must deduplicate requests themselves.
    pub fn scan(&self, event: &ScanEvent) -> EngineResult<ScanReceipt> {
        if event.client.trim().is_empty() {
            return Err(EngineError::Validation("client must not be empty".to_string()));
        }
        if event.quantity_delta == 0 {
            return Err(EngineError::Validation(
                "quantity delta must not be zero".to_string(),
            ));
        }

        let code = self.normalizer.normalize(&event.raw_code);

        // Only consulted when this is the first write for the key; an
        // existing entry keeps the total copied at creation.
        let order_total = self.order_store.total_for(event.date, &event.client);

        let entry = match self.ledger_repo.apply(
            event.date,
            &event.client,
            event.quantity_delta,
            order_total,
        ) {
            Ok(entry) => entry,
            Err(e @ RepositoryError::InvalidUndo { .. }) => {
                warn!(
                    client = %event.client,
                    date = %event.date,
                    delta = event.quantity_delta,
                    "undo rejected, counter already at zero"
                );
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        let action = if event.quantity_delta > 0 {
            ScanAction::Scan
        } else {
            ScanAction::Undo
        };
        let log_entry = ScanLogEntry::new(
            event.date,
            event.client.clone(),
            action,
            code.as_str().to_string(),
            event.quantity_delta,
            entry.scanned,
        );
        if let Err(e) = self.scan_log_repo.append(&log_entry) {
            // the counter is already committed; failing the request now
            // would push the caller into a double-counting retry
            error!(error = %e, "scan audit append failed");
        }

        info!(
            client = %event.client,
            date = %event.date,
            code = %code,
            delta = event.quantity_delta,
            scanned = entry.scanned,
            total = ?entry.total,
            "scan applied"
        );

        Ok(ScanReceipt::from_entry(code, &entry))
    }

    /// Distinct clients with an order line on `date` (empty when no
    /// order file exists).
    pub fn list_clients(&self, date: NaiveDate) -> Vec<String> {
        self.order_store.list_clients(date)
    }

    /// Acknowledge that an operator finished a client.
    ///
    /// Deliberately mutates no ledger state: only an audit record and
    /// a log line. Scans for the client remain accepted afterwards.
    pub fn finish(&self, client: &str) -> EngineResult<()> {
        if client.trim().is_empty() {
            return Err(EngineError::Validation("client must not be empty".to_string()));
        }

        let today = chrono::Local::now().date_naive();
        let log_entry = ScanLogEntry::new(
            today,
            client.to_string(),
            ScanAction::Finish,
            String::new(),
            0,
            0,
        );
        self.scan_log_repo.append(&log_entry)?;

        info!(client = %client, "client finished");
        Ok(())
    }
}
