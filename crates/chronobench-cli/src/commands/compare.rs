//! The `chronobench compare` command.

use std::path::PathBuf;

use anyhow::Result;

use chronobench_core::report::RunReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = RunReport::load_json(&baseline_path)?;
    let current = RunReport::load_json(&current_path)?;

    let comparison = current.compare(&baseline, threshold);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&comparison)?),
        "markdown" => println!("{}", comparison.to_markdown()),
        _ => {
            println!(
                "{} regression(s), {} improvement(s), {} unchanged, {} new, {} removed",
                comparison.regressions.len(),
                comparison.improvements.len(),
                comparison.unchanged,
                comparison.new_types,
                comparison.removed_types
            );
            for r in &comparison.regressions {
                println!(
                    "  REGRESSED {}: {:.1}% -> {:.1}%",
                    r.question_type,
                    r.baseline_percentage * 100.0,
                    r.current_percentage * 100.0
                );
            }
            for i in &comparison.improvements {
                println!(
                    "  improved {}: {:.1}% -> {:.1}%",
                    i.question_type,
                    i.baseline_percentage * 100.0,
                    i.current_percentage * 100.0
                );
            }
        }
    }

    if fail_on_regression && comparison.has_regressions() {
        anyhow::bail!("regressions detected");
    }

    Ok(())
}
