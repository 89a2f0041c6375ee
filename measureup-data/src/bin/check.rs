use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use measureup_core::resolver::ValueTable;
use measureup_data::loader;

/// Validate a MeasureUp reference CSV before a session uses it.
///
/// Checks that every required column is present and every cell parses,
/// then reports the value names found and any duplicate fully-specified
/// rows (which the resolver would otherwise tie-break silently at
/// estimation time).
#[derive(Parser, Debug)]
#[command(name = "measureup-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the reference data CSV
    #[arg(short, long)]
    file: PathBuf,

    /// List every value name found in the file
    #[arg(short, long, default_value_t = false)]
    categories: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking reference data: {}", args.file.display());

    let table = loader::load_from_file(&args.file)
        .with_context(|| format!("Failed to load: {}", args.file.display()))?;

    println!(
        "Parsed {} rows covering {} value names",
        table.len(),
        table.categories().len()
    );

    if args.categories {
        for name in table.categories() {
            println!("  {name}");
        }
    }

    let duplicates = duplicate_full_keys(&table);
    if duplicates.is_empty() {
        println!("No duplicate fully-specified rows found.");
    } else {
        for key in &duplicates {
            println!("warning: multiple rows match {key}; the first in table order wins");
        }
    }

    Ok(())
}

/// Fully-specified keys (value name, level, silver name) that appear on
/// more than one row, in first-appearance order.
fn duplicate_full_keys(table: &ValueTable) -> Vec<String> {
    let mut counts: HashMap<(String, &'static str, Option<String>), usize> = HashMap::new();
    for row in table.rows() {
        *counts
            .entry((
                row.value_name.clone(),
                row.level.as_str(),
                row.silver_name.clone(),
            ))
            .or_default() += 1;
    }

    let mut reported = Vec::new();
    for row in table.rows() {
        let key = (
            row.value_name.clone(),
            row.level.as_str(),
            row.silver_name.clone(),
        );
        if counts.get(&key).copied().unwrap_or(0) > 1 {
            let label = match &key.2 {
                Some(silver) => format!("'{}' / {} / '{}'", key.0, key.1, silver),
                None => format!("'{}' / {}", key.0, key.1),
            };
            if !reported.contains(&label) {
                reported.push(label);
            }
        }
    }
    reported
}
