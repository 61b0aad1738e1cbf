//! The `chronobench validate` command.

use std::path::PathBuf;

use anyhow::Result;

use chronobench_core::parser;

pub fn execute(facts_path: PathBuf) -> Result<()> {
    let sets = if facts_path.is_dir() {
        parser::load_fact_directory(&facts_path)?
    } else {
        vec![parser::parse_fact_set(&facts_path)?]
    };

    anyhow::ensure!(!sets.is_empty(), "no fact sets found in {}", facts_path.display());

    let mut total_warnings = 0usize;
    for set in &sets {
        let warnings = parser::validate_fact_set(set);
        println!(
            "{}: {} fact(s), {} warning(s)",
            set.id,
            set.facts.len(),
            warnings.len()
        );
        for warning in &warnings {
            match warning.fact_index {
                Some(i) => println!("  fact #{i}: {}", warning.message),
                None => println!("  {}", warning.message),
            }
        }
        total_warnings += warnings.len();
    }

    if total_warnings > 0 {
        anyhow::bail!("{total_warnings} validation warning(s) found");
    }

    println!("All fact sets valid.");
    Ok(())
}
