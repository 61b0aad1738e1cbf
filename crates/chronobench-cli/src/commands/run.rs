//! The `chronobench run` command.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use chronobench_core::engine::{EvalEngine, EvalEngineConfig, ModelSpec, ProgressReporter};
use chronobench_core::model::EvaluationRecord;
use chronobench_core::parser;
use chronobench_core::traits::InferenceProvider;
use chronobench_core::validate::RawAnswerFormat;
use chronobench_nlp::RuleLemmatizer;
use chronobench_providers::config::load_config_from;
use chronobench_providers::create_provider;
use chronobench_report::{write_csv_records, write_markdown_report};

use super::parse_kinds;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_ask(&self, model: &str, question: &str) {
        tracing::debug!("asking {model}: {question}");
    }

    fn on_record(&self, record: &EvaluationRecord) {
        let verdict = if record.is_correct {
            "correct"
        } else if record.is_valid {
            "wrong"
        } else {
            "invalid"
        };
        eprintln!(
            "  {} :: {} [{}] -> {:?} ({verdict})",
            record.model, record.kind, record.question_text, record.normalized_model_answer,
        );
    }

    fn on_run_complete(&self, total: usize, correct: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {correct}/{total} correct ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    facts_path: PathBuf,
    models_str: Option<String>,
    kinds: Option<String>,
    parallelism: usize,
    falsy_years: Option<u32>,
    output: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
    wrapped_answers: bool,
) -> Result<()> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let config = load_config_from(config_path.as_deref())?;
    let fact_set = parser::parse_fact_set(&facts_path)?;

    let warnings = parser::validate_fact_set(&fact_set);
    for warning in &warnings {
        tracing::warn!(
            fact = ?warning.fact_index,
            "{}",
            warning.message
        );
    }

    // Parse models as provider/model; model ids may themselves contain '/'
    let models: Vec<ModelSpec> = if let Some(m) = &models_str {
        m.split(',')
            .map(|s| {
                let parts: Vec<&str> = s.trim().splitn(2, '/').collect();
                if parts.len() == 2 && config.providers.contains_key(parts[0]) {
                    ModelSpec {
                        provider: parts[0].to_string(),
                        model: parts[1].to_string(),
                    }
                } else {
                    ModelSpec {
                        provider: config.default_provider.clone(),
                        model: s.trim().to_string(),
                    }
                }
            })
            .collect()
    } else {
        vec![ModelSpec {
            provider: config.default_provider.clone(),
            model: config.default_model.clone(),
        }]
    };

    let mut providers: HashMap<String, Arc<dyn InferenceProvider>> = HashMap::new();
    for (name, provider_config) in &config.providers {
        providers.insert(
            name.clone(),
            Arc::from(create_provider(name, provider_config)?),
        );
    }
    anyhow::ensure!(
        !providers.is_empty(),
        "no providers configured; run `chronobench init` or set CHRONOBENCH_HF_TOKEN"
    );

    let mut engine_config = EvalEngineConfig {
        parallelism,
        kinds: parse_kinds(kinds.as_deref())?,
        ..Default::default()
    };
    engine_config.options.falsy_year_count = falsy_years.or(config.falsy_years);
    engine_config.answer_format = if wrapped_answers {
        RawAnswerFormat::Enveloped
    } else {
        RawAnswerFormat::Plain
    };

    let engine = EvalEngine::new(providers, Arc::new(RuleLemmatizer::new()), engine_config);
    let report = engine.run(&fact_set, &models, &ConsoleReporter).await?;

    std::fs::create_dir_all(&output)?;
    let stem = format!("run-{}", report.id);

    if format == "json" || format == "all" {
        let path = output.join(format!("{stem}.json"));
        report.save_json(&path)?;
        eprintln!("JSON report: {}", path.display());
    }
    if format == "markdown" || format == "all" {
        let path = output.join(format!("{stem}.md"));
        write_markdown_report(&report, &path)?;
        eprintln!("Markdown report: {}", path.display());
    }
    if format == "csv" || format == "all" {
        let path = output.join(format!("{stem}.csv"));
        write_csv_records(&report, &path)?;
        eprintln!("CSV records: {}", path.display());
    }

    for summary in &report.summaries {
        eprintln!(
            "{}: {}/{} correct ({:.1}%)",
            summary.question_type,
            summary.correct_count,
            summary.size,
            summary.correct_percentage * 100.0
        );
    }

    Ok(())
}
