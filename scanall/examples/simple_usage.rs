// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Simple example of materializing statement results into records
//!
//! Run with: cargo run --example simple_usage

use scanall::memory::MemoryTable;
use scanall::{collect_all, materialize_all, params, scannable, Select};
use std::error::Error;

#[derive(Debug, Default)]
struct Label {
    id: i32,
    name: String,
}

scannable!(Label { id, name });

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== scanall Simple Usage Example ===\n");

    // Step 1: Fill a table with (id, name, state) rows
    println!("1. Inserting rows...");
    let table = MemoryTable::new();
    table.insert_all(vec![
        params![1, "bug", "open"],
        params![2, "feature", "open"],
        params![3, "wontfix", "closed"],
    ]);
    println!("   ✓ {} rows inserted\n", table.len());

    // Step 2: SELECT id, name FROM labels WHERE state = ?
    println!("2. Preparing statement...");
    let stmt = table.prepare(Select::all().columns([0, 1]).filter_eq(2));
    println!("   ✓ Expects {} bind argument(s)\n", stmt.select().parameter_count());

    // Step 3: Materialize into a caller-owned Vec
    println!("3. Materializing open labels...");
    let mut labels: Vec<Label> = Vec::new();
    materialize_all(&stmt, &mut labels, &params!["open"])?;
    for label in &labels {
        println!("   → {} {}", label.id, label.name);
    }
    println!();

    // Step 4: Or collect into a fresh Vec
    println!("4. Collecting closed labels...");
    let closed: Vec<Label> = collect_all(&stmt, &params!["closed"])?;
    println!("   ✓ {} closed label(s)\n", closed.len());

    // Step 5: Errors are returned, never swallowed
    println!("5. Executing with a missing argument...");
    match collect_all::<Label, _>(&stmt, &[]) {
        Ok(_) => println!("   ✗ Unexpected success"),
        Err(e) => println!("   ✓ {}", e),
    }

    println!("\n=== Example completed ===");
    Ok(())
}
