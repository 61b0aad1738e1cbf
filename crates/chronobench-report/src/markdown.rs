//! Markdown report generator.

use std::path::Path;

use anyhow::{Context, Result};

use chronobench_core::report::RunReport;

/// Escape characters markdown tables cannot carry in a cell.
fn cell_escape(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Render a run report as a markdown document.
pub fn generate_markdown(report: &RunReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# chronobench report — {}\n\n", report.dataset.name));
    md.push_str(&format!(
        "Fact set: **{}** | {} facts | models: {} | {} | {:.1}s\n\n",
        report.dataset.id,
        report.dataset.fact_count,
        report.models_evaluated.join(", "),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.duration_ms as f64 / 1000.0,
    ));

    md.push_str("## Summary\n\n");
    md.push_str("| Question type | Size | Valid | Correct | Correct % | Time |\n");
    md.push_str("|---------------|------|-------|---------|-----------|------|\n");
    for summary in &report.summaries {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {:.1}% | {} |\n",
            cell_escape(&summary.question_type),
            summary.size,
            summary.valid_count,
            summary.correct_count,
            summary.correct_percentage * 100.0,
            summary.time_processed,
        ));
    }
    md.push('\n');

    let grouped: Vec<_> = report
        .summaries
        .iter()
        .filter(|s| s.correctly_answered_groups.is_some())
        .collect();
    if !grouped.is_empty() {
        md.push_str("## Robust scoring\n\n");
        for summary in grouped {
            md.push_str(&format!(
                "- **{}**: {} fully correct fact(s) ({:.1}%)\n",
                cell_escape(&summary.question_type),
                summary.correctly_answered_groups.unwrap_or(0),
                summary.correctly_answered_groups_percentage.unwrap_or(0.0) * 100.0,
            ));
        }
        md.push('\n');
    }

    let with_predicates: Vec<_> = report
        .summaries
        .iter()
        .filter(|s| !s.per_predicate.is_empty())
        .collect();
    if !with_predicates.is_empty() {
        md.push_str("## Per-predicate breakdown\n\n");
        for summary in with_predicates {
            md.push_str(&format!("### {}\n\n", cell_escape(&summary.question_type)));
            md.push_str("| Predicate | Size | Valid | Correct |\n");
            md.push_str("|-----------|------|-------|---------|\n");
            for (predicate, stats) in &summary.per_predicate {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    cell_escape(predicate),
                    stats.size,
                    stats.valid,
                    stats.correct,
                ));
            }
            md.push('\n');
        }
    }

    if !report.skipped.is_empty() {
        md.push_str("## Skipped generators\n\n");
        for (kind, count) in &report.skipped {
            md.push_str(&format!(
                "- {}: {} fact(s) without the required interval\n",
                cell_escape(kind),
                count
            ));
        }
        md.push('\n');
    }

    md
}

/// Write the markdown report to a file.
pub fn write_markdown_report(report: &RunReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
    Ok(())
}
