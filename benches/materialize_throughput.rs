/// Benchmark for materialize_all throughput
///
/// Measures rows per second materialized into a Vec from the in-memory table
/// and, with the sled backend enabled, from an on-disk table.

use scanall::memory::MemoryTable;
use scanall::{materialize_all, params, scannable, Select};
use std::time::{Duration, Instant};

#[allow(dead_code)]
#[derive(Debug, Default)]
struct Event {
    id: i64,
    kind: String,
    weight: f64,
}

scannable!(Event { id, kind, weight });

const ROWS: i64 = 100_000;
const ITERATIONS: usize = 10;

fn report(label: &str, rows: usize, duration: Duration) -> f64 {
    let rows_per_sec = rows as f64 / duration.as_secs_f64();
    println!("  {}", label);
    println!("  Rows: {}", rows);
    println!("  Time: {:?}", duration);
    println!("  Throughput: {:.0} rows/sec", rows_per_sec);
    println!();
    rows_per_sec
}

fn main() {
    println!("=== Materialize Throughput Benchmark ===\n");

    let table = MemoryTable::new();
    for i in 0..ROWS {
        let kind = if i % 4 == 0 { "click" } else { "view" };
        table.insert(params![i, kind, i as f64 * 0.5]);
    }

    println!("📊 Memory table, full scan:");
    let stmt = table.prepare(Select::all());
    let start = Instant::now();
    let mut total = 0;
    for _ in 0..ITERATIONS {
        let mut events: Vec<Event> = Vec::with_capacity(ROWS as usize);
        materialize_all(&stmt, &mut events, &[]).expect("Failed to materialize");
        total += events.len();
    }
    let full_scan = report("Full scan", total, start.elapsed());

    println!("📊 Memory table, filtered scan:");
    let stmt = table.prepare(Select::all().filter_eq(1));
    let start = Instant::now();
    let mut total = 0;
    for _ in 0..ITERATIONS {
        let mut events: Vec<Event> = Vec::new();
        materialize_all(&stmt, &mut events, &params!["click"]).expect("Failed to materialize");
        total += events.len();
    }
    let filtered = report("Filtered scan (kind = 'click')", total, start.elapsed());

    #[cfg(feature = "sled-backend")]
    let sled = sled_scan();
    #[cfg(not(feature = "sled-backend"))]
    let sled = 0.0;

    println!("=== Summary ===");
    println!("  Memory full scan:     {:.0} rows/sec", full_scan);
    println!("  Memory filtered scan: {:.0} rows/sec", filtered);
    if sled > 0.0 {
        println!("  Sled full scan:       {:.0} rows/sec", sled);
    }
}

#[cfg(feature = "sled-backend")]
fn sled_scan() -> f64 {
    use scanall::storage::{SledStore, StoreConfig};

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = SledStore::open(StoreConfig::new(temp_dir.path().join("bench_db")))
        .expect("Failed to open store");
    let table = store.table("events").expect("Failed to open table");
    for i in 0..ROWS {
        table
            .insert(&params![i, "view", i as f64])
            .expect("Failed to insert");
    }
    store.flush().expect("Failed to flush");

    println!("📊 Sled table, full scan:");
    let stmt = table.prepare(Select::all());
    let start = Instant::now();
    let mut total = 0;
    for _ in 0..ITERATIONS {
        let mut events: Vec<Event> = Vec::new();
        materialize_all(&stmt, &mut events, &[]).expect("Failed to materialize");
        total += events.len();
    }
    report("Full scan", total, start.elapsed())
}
