// ==========================================
// Container Scan Reconciliation - Demo Order Seeder
// ==========================================
// Writes a demo <orders_dir>/<date>/data.json so the scanner flow
// can be exercised without the external conversion pipeline.
// Usage: seed_demo_orders [YYYY-MM-DD]
// ==========================================

use scan_recon::app::get_default_orders_dir;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    scan_recon::logging::init();

    let date = std::env::args()
        .nth(1)
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());
    chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("malformed date: {:?}", date))?;

    let day_dir = get_default_orders_dir().join(&date);
    std::fs::create_dir_all(&day_dir)?;

    let rows = json!([
        { "Odbiorca": "Acme",    "Ilosc": 10 },
        { "Odbiorca": "Globex",  "Ilosc": 4 },
        { "Odbiorca": "Initech", "Ilosc": 25 },
        { "Odbiorca": "Initech", "Ilosc": 5 }
    ]);

    let path = day_dir.join("data.json");
    std::fs::write(&path, serde_json::to_string_pretty(&rows)?)?;

    tracing::info!("seeded demo orders: {}", path.display());
    Ok(())
}
