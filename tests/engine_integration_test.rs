// ==========================================
// Engine integration tests
// ==========================================
// Target: the full scan flow through AppState — order file load,
// normalization, ledger counters, undo, restart durability.
// ==========================================

mod test_helpers;

use scan_recon::api::{ApiError, ScanRequest};
use scan_recon::app::AppState;
use scan_recon::logging;
use serde_json::json;

fn scan(state: &AppState, date: &str, client: &str, container: &str, qty: i64) -> Result<scan_recon::api::ScanResponse, ApiError> {
    state.scan_api.scan(&ScanRequest {
        date: date.to_string(),
        client: client.to_string(),
        container: container.to_string(),
        qty,
    })
}

#[test]
fn test_full_scan_undo_scenario() {
    logging::init_test();

    let (_db_guard, db_path) = test_helpers::create_test_db();
    let orders = test_helpers::create_orders_dir();
    test_helpers::write_order_file(
        orders.path(),
        "2024-05-01",
        &json!([
            { "Odbiorca": "Acme", "Ilosc": 4 },
            { "Odbiorca": "Acme", "Ilosc": 6 }
        ]),
    );

    let state = AppState::new(&db_path, orders.path()).expect("Failed to build AppState");

    // scan 3 -> 3/10, remaining 7
    let r = scan(&state, "2024-05-01", "Acme", "SUDU1234567", 3).expect("Failed to scan");
    assert_eq!(r.scanned, 3);
    assert_eq!(r.total, Some(10));
    assert_eq!(r.remaining, Some(7));
    assert_eq!(r.message, "Added 3");

    // scan 4 -> 7, remaining 3
    let r = scan(&state, "2024-05-01", "Acme", "MSKU7654321", 4).expect("Failed to scan");
    assert_eq!(r.scanned, 7);
    assert_eq!(r.remaining, Some(3));

    // undo the last scan -> back to 3/7
    let r = scan(&state, "2024-05-01", "Acme", "MSKU7654321", -4).expect("Failed to undo");
    assert_eq!(r.scanned, 3);
    assert_eq!(r.remaining, Some(7));
    assert_eq!(r.message, "Removed 4");

    // undo on a fresh key is rejected, ledger unchanged
    let err = scan(&state, "2024-05-01", "Globex", "TCLU0000001", -3)
        .expect_err("Undo on fresh key must be rejected");
    assert!(matches!(err, ApiError::InvalidUndo(_)));
}

#[test]
fn test_ocr_correction_applies_before_counting() {
    logging::init_test();

    let (_db_guard, db_path) = test_helpers::create_test_db();
    let orders = test_helpers::create_orders_dir();
    test_helpers::write_order_file(
        orders.path(),
        "2024-05-01",
        &json!([{ "Odbiorca": "Acme", "Ilosc": 10 }]),
    );

    let state = AppState::new(&db_path, orders.path()).expect("Failed to build AppState");

    // leading letter dropped by OCR
    let r = scan(&state, "2024-05-01", "Acme", "UDU1234567", 1).expect("Failed to scan");
    assert_eq!(r.code, "SUDU1234567");

    // no matching prefix: recorded as cleaned
    let r = scan(&state, "2024-05-01", "Acme", "zzzz 9999999", 1).expect("Failed to scan");
    assert_eq!(r.code, "ZZZZ9999999");
    assert_eq!(r.scanned, 2);
}

#[test]
fn test_counters_survive_restart() {
    logging::init_test();

    let (_db_guard, db_path) = test_helpers::create_test_db();
    let orders = test_helpers::create_orders_dir();
    test_helpers::write_order_file(
        orders.path(),
        "2024-05-01",
        &json!([{ "Odbiorca": "Acme", "Ilosc": 10 }]),
    );

    {
        let state = AppState::new(&db_path, orders.path()).expect("Failed to build AppState");
        scan(&state, "2024-05-01", "Acme", "SUDU1234567", 6).expect("Failed to scan");
    }

    // new process, same database
    let state = AppState::new(&db_path, orders.path()).expect("Failed to rebuild AppState");
    let r = scan(&state, "2024-05-01", "Acme", "SUDU1234567", 1).expect("Failed to scan");
    assert_eq!(r.scanned, 7);
    assert_eq!(r.remaining, Some(3));
}

#[test]
fn test_unknown_order_total_stays_unknown() {
    logging::init_test();

    let (_db_guard, db_path) = test_helpers::create_test_db();
    let orders = test_helpers::create_orders_dir();
    // no order file at all for the date

    let state = AppState::new(&db_path, orders.path()).expect("Failed to build AppState");

    let r = scan(&state, "2024-05-01", "Acme", "SUDU1234567", 2).expect("Failed to scan");
    assert_eq!(r.total, None);
    assert_eq!(r.remaining, None);

    // order file appearing later does not backfill the copied total
    test_helpers::write_order_file(
        orders.path(),
        "2024-05-01",
        &json!([{ "Odbiorca": "Acme", "Ilosc": 10 }]),
    );
    let r = scan(&state, "2024-05-01", "Acme", "SUDU1234567", 1).expect("Failed to scan");
    assert_eq!(r.scanned, 3);
    assert_eq!(r.total, None);
}
