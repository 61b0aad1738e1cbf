//! Quick eval example — minimal programmatic usage of chronobench.
//!
//! This example demonstrates how to use chronobench as a library to
//! generate questions from a fact set and score a model's answers.
//!
//! ```bash
//! # Set your API token first:
//! export CHRONOBENCH_HF_TOKEN="hf_..."
//!
//! # Run the example from the repository root:
//! cargo run --example quick_eval
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chronobench_core::engine::{EvalEngine, EvalEngineConfig, ModelSpec, NoopReporter};
use chronobench_core::model::QuestionKind;
use chronobench_core::parser;
use chronobench_core::traits::InferenceProvider;
use chronobench_nlp::RuleLemmatizer;
use chronobench_providers::config::load_config;
use chronobench_providers::create_provider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load provider config from chronobench.toml
    let config = load_config()?;

    // Parse a fact set from a TOML file
    let fact_set = parser::parse_fact_set("facts/example-presidents.toml".as_ref())?;
    println!(
        "Loaded fact set: {} ({} facts)",
        fact_set.name,
        fact_set.facts.len()
    );

    // Create a provider
    let provider_config = config
        .providers
        .get("huggingface")
        .expect("huggingface provider not configured");
    let provider = create_provider("huggingface", provider_config)?;

    let mut providers: HashMap<String, Arc<dyn InferenceProvider>> = HashMap::new();
    providers.insert("huggingface".to_string(), Arc::from(provider));

    // Configure the eval engine: yes/no with two distractor years per side
    let mut engine_config = EvalEngineConfig {
        parallelism: 2,
        kinds: vec![QuestionKind::YesNo, QuestionKind::SimpleWhen],
        ..Default::default()
    };
    engine_config.options.falsy_year_count = Some(2);

    let engine = EvalEngine::new(providers, Arc::new(RuleLemmatizer::new()), engine_config);

    // Define which models to evaluate
    let models = vec![ModelSpec {
        provider: "huggingface".to_string(),
        model: "bigscience/T0pp".to_string(),
    }];

    // Run the eval
    let report = engine.run(&fact_set, &models, &NoopReporter).await?;

    // Print the summaries
    println!("\n--- Results ---\n");
    for summary in &report.summaries {
        println!(
            "{:<30} {:>4} questions, {:>4} valid, {:>4} correct ({:.1}%)",
            summary.question_type,
            summary.size,
            summary.valid_count,
            summary.correct_count,
            summary.correct_percentage * 100.0
        );
        if let Some(groups) = summary.correctly_answered_groups {
            println!("{:<30} {:>4} fully correct fact(s)", "", groups);
        }
    }

    // Persist the full report
    report.save_json("chronobench-results/quick-eval.json".as_ref())?;
    println!("\nReport saved to chronobench-results/quick-eval.json");

    Ok(())
}
