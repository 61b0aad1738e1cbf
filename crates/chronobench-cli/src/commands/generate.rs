//! The `chronobench generate` command.

use std::path::PathBuf;

use anyhow::Result;

use chronobench_core::generate::{GeneratorOptions, QuestionGenerator};
use chronobench_core::parser;
use chronobench_nlp::RuleLemmatizer;

use super::parse_kinds;

pub fn execute(
    facts_path: PathBuf,
    kinds: Option<String>,
    falsy_years: Option<u32>,
    all_years: bool,
    no_year_hint: bool,
    no_lemma: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let fact_set = parser::parse_fact_set(&facts_path)?;
    let kinds = parse_kinds(kinds.as_deref())?;

    let mut options = GeneratorOptions::new();
    options.falsy_year_count = falsy_years;
    options.all_interval_years = all_years;
    options.show_year_hint = !no_year_hint;
    options.lemmatize = !no_lemma;

    let lemmatizer = RuleLemmatizer::new();
    let generator = QuestionGenerator::new(&lemmatizer, options);
    let batch = generator.generate_batch(&kinds, &fact_set.facts)?;

    eprintln!(
        "Generated {} question(s) from {} fact(s); {} generator skip(s)",
        batch.questions.len(),
        fact_set.facts.len(),
        batch.skipped.values().sum::<usize>()
    );

    let json = serde_json::to_string_pretty(&batch)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)?;
            eprintln!("Questions written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
