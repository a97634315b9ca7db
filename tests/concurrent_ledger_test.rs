// ==========================================
// Concurrency control tests
// ==========================================
// Target: applies for the same (date, client) key are linearized —
// concurrent increments never lose updates.
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use scan_recon::logging;
use scan_recon::repository::FulfillmentLedgerRepository;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_increments_are_not_lost() {
    logging::init_test();

    let (_db_guard, db_path) = test_helpers::create_test_db();
    let repo = Arc::new(
        FulfillmentLedgerRepository::new(&db_path).expect("Failed to create ledger repo"),
    );
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    const THREADS: usize = 16;
    const INCREMENTS_PER_THREAD: usize = 5;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                for _ in 0..INCREMENTS_PER_THREAD {
                    repo.apply(date, "Acme", 1, Some(100)).expect("Failed to apply");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Worker thread panicked");
    }

    let entry = repo
        .get(date, "Acme")
        .expect("Failed to get")
        .expect("Entry not found");
    assert_eq!(entry.scanned, (THREADS * INCREMENTS_PER_THREAD) as i64);
}

#[test]
fn test_concurrent_mixed_keys_stay_isolated() {
    logging::init_test();

    let (_db_guard, db_path) = test_helpers::create_test_db();
    let repo = Arc::new(
        FulfillmentLedgerRepository::new(&db_path).expect("Failed to create ledger repo"),
    );
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let clients: [&'static str; 4] = ["Acme", "Globex", "Initech", "Umbrella"];
    let handles: Vec<_> = clients
        .into_iter()
        .map(|client| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                for _ in 0..10 {
                    repo.apply(date, client, 1, None).expect("Failed to apply");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Worker thread panicked");
    }

    for client in clients {
        let entry = repo
            .get(date, client)
            .expect("Failed to get")
            .expect("Entry not found");
        assert_eq!(entry.scanned, 10, "client {}", client);
    }
}
