// ==========================================
// Container Scan Reconciliation - Order Store
// ==========================================
// Read-only adapter over the daily order files produced by the
// external conversion pipeline: <orders_dir>/<YYYY-MM-DD>/data.json,
// an array of rows keyed by the client-name column "Odbiorca" with
// the ordered unit count in "Ilosc".
//
// A missing file, unreadable file or malformed JSON is "no order on
// file", never an error: scans must keep working on days without a
// converted order.
// ==========================================

use crate::domain::OrderLine;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Consumed interface of the daily order data.
///
/// The engine only ever reads; order files are immutable for a date
/// once converted.
pub trait OrderStore: Send + Sync {
    /// Distinct client names with an order line on `date`.
    /// Empty when no order file exists.
    fn list_clients(&self, date: NaiveDate) -> Vec<String>;

    /// Expected units for `(date, client)`, or None when no order is
    /// on file (unknown total, over/under-scan cannot be judged).
    fn total_for(&self, date: NaiveDate, client: &str) -> Option<i64>;
}

/// One row of data.json. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(rename = "Odbiorca")]
    client: Option<String>,
    #[serde(rename = "Ilosc", default)]
    quantity: Option<i64>,
}

/// File-backed order store rooted at an orders directory.
pub struct JsonFileOrderStore {
    orders_dir: PathBuf,
}

impl JsonFileOrderStore {
    pub fn new(orders_dir: impl Into<PathBuf>) -> Self {
        Self {
            orders_dir: orders_dir.into(),
        }
    }

    fn order_file(&self, date: NaiveDate) -> PathBuf {
        self.orders_dir
            .join(date.format("%Y-%m-%d").to_string())
            .join("data.json")
    }

    /// Best-effort row load; any failure degrades to "no rows".
    fn load_rows(&self, date: NaiveDate) -> Vec<OrderRow> {
        let path = self.order_file(date);
        match read_rows(&path) {
            Some(rows) => rows,
            None => {
                debug!(path = %path.display(), "no readable order file for date");
                Vec::new()
            }
        }
    }

    /// Per-client totals for one date.
    ///
    /// Rows sharing a client sum into one total; rows without a
    /// quantity column leave the client listed but its total unknown.
    fn totals(&self, date: NaiveDate) -> BTreeMap<String, Option<i64>> {
        let mut totals: BTreeMap<String, Option<i64>> = BTreeMap::new();

        for row in self.load_rows(date) {
            let client = match row.client {
                Some(c) if !c.trim().is_empty() => c,
                _ => continue,
            };

            let slot = totals.entry(client).or_insert(None);
            if let Some(qty) = row.quantity {
                *slot = Some(slot.unwrap_or(0) + qty);
            }
        }

        totals
    }

    /// Aggregated order lines for one date (one line per client with a
    /// known total). Clients whose rows carry no quantity column are
    /// listed by `list_clients` but have no line here.
    pub fn order_lines(&self, date: NaiveDate) -> Vec<OrderLine> {
        self.totals(date)
            .into_iter()
            .filter_map(|(client, total)| {
                total.map(|total| OrderLine {
                    date,
                    client,
                    total,
                })
            })
            .collect()
    }
}

fn read_rows(path: &Path) -> Option<Vec<OrderRow>> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

impl OrderStore for JsonFileOrderStore {
    fn list_clients(&self, date: NaiveDate) -> Vec<String> {
        self.totals(date).into_keys().collect()
    }

    fn total_for(&self, date: NaiveDate, client: &str) -> Option<i64> {
        self.totals(date).remove(client).flatten()
    }
}
