//! Custom scoring example — compute custom metrics from a saved run.
//!
//! This example shows how to load a run report and derive scores the
//! built-in summaries do not carry, such as accuracy over valid answers
//! only (how often the model is right when it answers in the expected
//! shape at all).
//!
//! ```bash
//! cargo run --example custom_scoring -- chronobench-results/run-<id>.json
//! ```

use std::collections::BTreeMap;
use std::env;

use chronobench_core::report::RunReport;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let report_path = args
        .get(1)
        .expect("Usage: custom_scoring <report.json>");

    // Load a previously generated report
    let report = RunReport::load_json(report_path.as_ref())?;
    println!(
        "Loaded report: {} records over {} fact(s)",
        report.records.len(),
        report.dataset.fact_count
    );

    // Custom scoring: accuracy over valid answers only, per question kind.
    // The built-in correct_percentage divides by all records, so a model
    // that answers in the wrong shape and one that answers wrongly look
    // the same; splitting the two apart shows which failure dominates.
    let mut per_kind: BTreeMap<String, (usize, usize, usize)> = BTreeMap::new();
    for record in &report.records {
        let entry = per_kind.entry(record.kind.to_string()).or_default();
        entry.0 += 1;
        if record.is_valid {
            entry.1 += 1;
        }
        if record.is_correct {
            entry.2 += 1;
        }
    }

    println!("\n--- Accuracy over valid answers ---\n");
    println!(
        "{:<15} {:>6} {:>6} {:>8} {:>12} {:>14}",
        "Kind", "Size", "Valid", "Correct", "Overall %", "Valid-only %"
    );
    println!("{}", "-".repeat(65));

    for (kind, (size, valid, correct)) in &per_kind {
        let overall = *correct as f64 / *size as f64 * 100.0;
        let valid_only = if *valid == 0 {
            0.0
        } else {
            *correct as f64 / *valid as f64 * 100.0
        };
        println!(
            "{kind:<15} {size:>6} {valid:>6} {correct:>8} {overall:>11.1}% {valid_only:>13.1}%"
        );
    }

    // Worst predicates: where does the model misfire most often?
    let mut per_predicate: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in &report.records {
        let entry = per_predicate.entry(record.predicate.as_str()).or_default();
        entry.0 += 1;
        if record.is_correct {
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<_> = per_predicate
        .into_iter()
        .map(|(predicate, (size, correct))| (predicate, correct as f64 / size as f64, size))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    println!("\n--- Hardest predicates ---\n");
    for (predicate, accuracy, size) in ranked.iter().take(5) {
        println!("{:<30} {:.1}% over {} question(s)", predicate, accuracy * 100.0, size);
    }

    Ok(())
}
