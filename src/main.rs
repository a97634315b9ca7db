// ==========================================
// Container Scan Reconciliation - Main Entry
// ==========================================
// Thin transport: one JSON request per stdin line, one JSON
// response per stdout line. The actual contracts live in the
// API layer; nothing here may panic on bad input.
//
// Requests:
//   {"op":"scan","date":"YYYY-MM-DD","client":"...","container":"...","qty":1}
//   {"op":"orders","date":"YYYY-MM-DD"}
//   {"op":"finish","client":"..."}
// ==========================================

use scan_recon::api::{ApiResult, ScanRequest};
use scan_recon::app::{get_default_db_path, get_default_orders_dir, AppState};
use serde::Deserialize;
use serde_json::json;
use std::io::{BufRead, Write};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    Scan(ScanRequest),
    Orders { date: String },
    Finish { client: String },
}

fn main() {
    scan_recon::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", scan_recon::APP_NAME);
    tracing::info!("version: {}", scan_recon::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    let orders_dir = get_default_orders_dir();
    tracing::info!("database: {}", db_path);
    tracing::info!("orders dir: {}", orders_dir.display());

    let state = match AppState::new(&db_path, orders_dir) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("failed to initialize application state: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&state, &line);

        let mut out = stdout.lock();
        // best effort; a closed pipe just ends the session
        if writeln!(out, "{}", response).is_err() {
            break;
        }
    }

    tracing::info!("session ended");
}

fn handle_line(state: &AppState, line: &str) -> serde_json::Value {
    let request: Request = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => return json!({ "message": format!("invalid request: {}", e) }),
    };

    match request {
        Request::Scan(scan) => to_response(state.scan_api.scan(&scan)),
        Request::Orders { date } => to_response(state.scan_api.list_clients(&date)),
        Request::Finish { client } => to_response(state.scan_api.finish(&client)),
    }
}

fn to_response<T: serde::Serialize>(result: ApiResult<T>) -> serde_json::Value {
    match result {
        Ok(value) => serde_json::to_value(value)
            .unwrap_or_else(|e| json!({ "message": format!("serialization failed: {}", e) })),
        Err(e) => json!({ "message": e.to_string() }),
    }
}
