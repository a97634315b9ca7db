// ==========================================
// Scan API boundary tests
// ==========================================
// Target: validation order, error messages, client listing, finish
// acknowledgement — everything an operator-facing front end relies on.
// ==========================================

mod test_helpers;

use scan_recon::api::{ApiError, ScanRequest};
use scan_recon::app::AppState;
use scan_recon::logging;
use serde_json::json;

fn build_state(order_rows: Option<&serde_json::Value>) -> (tempfile::NamedTempFile, tempfile::TempDir, AppState) {
    let (db_guard, db_path) = test_helpers::create_test_db();
    let orders = test_helpers::create_orders_dir();
    if let Some(rows) = order_rows {
        test_helpers::write_order_file(orders.path(), "2024-05-01", rows);
    }
    let state = AppState::new(&db_path, orders.path()).expect("Failed to build AppState");
    (db_guard, orders, state)
}

fn request(date: &str, client: &str, container: &str, qty: i64) -> ScanRequest {
    ScanRequest {
        date: date.to_string(),
        client: client.to_string(),
        container: container.to_string(),
        qty,
    }
}

#[test]
fn test_validation_rejections() {
    logging::init_test();
    let (_db, _orders, state) = build_state(None);

    // malformed date is checked first
    let err = state
        .scan_api
        .scan(&request("05/01/2024", "Acme", "SUDU1234567", 1))
        .expect_err("Malformed date must be rejected");
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(err.to_string().contains("date"));

    // empty client
    let err = state
        .scan_api
        .scan(&request("2024-05-01", "", "SUDU1234567", 1))
        .expect_err("Empty client must be rejected");
    assert!(matches!(err, ApiError::InvalidInput(_)));

    // zero delta
    let err = state
        .scan_api
        .scan(&request("2024-05-01", "Acme", "SUDU1234567", 0))
        .expect_err("Zero delta must be rejected");
    assert!(matches!(err, ApiError::InvalidInput(_)));

    // nothing was recorded by any of the rejected requests
    let r = state
        .scan_api
        .scan(&request("2024-05-01", "Acme", "SUDU1234567", 1))
        .expect("Failed to scan");
    assert_eq!(r.scanned, 1);
}

#[test]
fn test_list_clients_from_order_file() {
    logging::init_test();
    let (_db, _orders, state) = build_state(Some(&json!([
        { "Odbiorca": "Globex", "Ilosc": 2 },
        { "Odbiorca": "Acme", "Ilosc": 4 },
        { "Odbiorca": "Acme", "Ilosc": 6 }
    ])));

    let clients = state
        .scan_api
        .list_clients("2024-05-01")
        .expect("Failed to list clients");
    assert_eq!(clients.len(), 2);
    assert!(clients.contains(&"Acme".to_string()));
    assert!(clients.contains(&"Globex".to_string()));

    // a date without an order file answers empty, not an error
    let clients = state
        .scan_api
        .list_clients("2024-05-02")
        .expect("Failed to list clients");
    assert!(clients.is_empty());

    // malformed date is still a validation error
    assert!(matches!(
        state.scan_api.list_clients("yesterday"),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_finish_acknowledgement() {
    logging::init_test();
    let (_db, _orders, state) = build_state(Some(&json!([
        { "Odbiorca": "Acme", "Ilosc": 10 }
    ])));

    state
        .scan_api
        .scan(&request("2024-05-01", "Acme", "SUDU1234567", 3))
        .expect("Failed to scan");

    let ack = state.scan_api.finish("Acme").expect("Failed to finish");
    assert!(ack.ok);

    // finish does not lock further scans for the client
    let r = state
        .scan_api
        .scan(&request("2024-05-01", "Acme", "SUDU1234567", 1))
        .expect("Failed to scan after finish");
    assert_eq!(r.scanned, 4);

    assert!(matches!(
        state.scan_api.finish(""),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_undo_message_tells_the_operator() {
    logging::init_test();
    let (_db, _orders, state) = build_state(None);

    let err = state
        .scan_api
        .scan(&request("2024-05-01", "Acme", "SUDU1234567", -2))
        .expect_err("Undo on fresh key must be rejected");

    match err {
        ApiError::InvalidUndo(msg) => {
            assert!(msg.contains("Acme"));
        }
        other => panic!("Expected InvalidUndo, got {:?}", other),
    }
}
