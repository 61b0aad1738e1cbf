//! Central eval engine.
//!
//! Drives a fact set through question generation, remote inference, and
//! scoring, bounded by a concurrency limit. The engine performs no retries:
//! pacing and retry policy belong to the caller, and the first provider
//! error fails the run.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::generate::{GeneratorOptions, QuestionGenerator};
use crate::model::{EvaluationRecord, FactSet, QuestionKind};
use crate::report::{DatasetSummary, RunReport};
use crate::statistics::{summarize, summarize_grouped};
use crate::traits::{AskRequest, InferenceProvider, Lemmatizer};
use crate::validate::{evaluate, RawAnswerFormat};

/// Configuration for the eval engine.
#[derive(Debug, Clone)]
pub struct EvalEngineConfig {
    /// Maximum concurrent inference requests.
    pub parallelism: usize,
    /// Question kinds to generate and score.
    pub kinds: Vec<QuestionKind>,
    /// Generation knobs (templates, distractors, phrasing).
    pub options: GeneratorOptions,
    /// Whether raw answers carry the serialized response envelope.
    pub answer_format: RawAnswerFormat,
}

impl Default for EvalEngineConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            kinds: QuestionKind::IMPLEMENTED.to_vec(),
            options: GeneratorOptions::new(),
            answer_format: RawAnswerFormat::Plain,
        }
    }
}

/// Which model to evaluate.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Provider name (e.g. "huggingface").
    pub provider: String,
    /// Model identifier (e.g. "bigscience/T0pp").
    pub model: String,
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_ask(&self, model: &str, question: &str);
    fn on_record(&self, record: &EvaluationRecord);
    fn on_run_complete(&self, total: usize, correct: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_ask(&self, _: &str, _: &str) {}
    fn on_record(&self, _: &EvaluationRecord) {}
    fn on_run_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// The central eval engine.
pub struct EvalEngine {
    providers: HashMap<String, Arc<dyn InferenceProvider>>,
    lemmatizer: Arc<dyn Lemmatizer>,
    config: EvalEngineConfig,
}

impl EvalEngine {
    pub fn new(
        providers: HashMap<String, Arc<dyn InferenceProvider>>,
        lemmatizer: Arc<dyn Lemmatizer>,
        config: EvalEngineConfig,
    ) -> Self {
        Self {
            providers,
            lemmatizer,
            config,
        }
    }

    /// Generate, ask, score, and summarize one fact set against the given
    /// models.
    pub async fn run(
        &self,
        fact_set: &FactSet,
        models: &[ModelSpec],
        progress: &dyn ProgressReporter,
    ) -> Result<RunReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism));

        let generator = QuestionGenerator::new(self.lemmatizer.as_ref(), self.config.options.clone());
        let batch = generator.generate_batch(&self.config.kinds, &fact_set.facts)?;
        tracing::info!(
            questions = batch.questions.len(),
            skips = batch.skipped.values().sum::<usize>(),
            "generated question batch"
        );

        let mut futures = FuturesUnordered::new();
        for spec in models {
            let Some(provider) = self.providers.get(&spec.provider) else {
                tracing::warn!("provider '{}' not found, skipping", spec.provider);
                continue;
            };

            for item in &batch.questions {
                progress.on_ask(&spec.model, &item.question.text);

                let provider = Arc::clone(provider);
                let semaphore = Arc::clone(&semaphore);
                let model = spec.model.clone();
                let item = item.clone();
                let answer_format = self.config.answer_format;

                futures.push(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

                    let request = AskRequest {
                        model: model.clone(),
                        prompt: item.question.text.clone(),
                    };
                    let response = provider.ask(&request).await?;

                    let record = evaluate(
                        item.kind,
                        &model,
                        &item.predicate,
                        item.fact_index,
                        &item.question.text,
                        &item.question.answer,
                        &response.raw_answer,
                        answer_format,
                    )?;
                    anyhow::Ok((record, response.latency_ms))
                });
            }
        }

        let mut records: Vec<EvaluationRecord> = Vec::new();
        // Wall-clock attributed to each (model, kind) batch: summed ask latency.
        let mut ask_millis: BTreeMap<(String, QuestionKind), u64> = BTreeMap::new();

        while let Some(result) = futures.next().await {
            let (record, latency_ms) = result?;
            progress.on_record(&record);
            *ask_millis
                .entry((record.model.clone(), record.kind))
                .or_default() += latency_ms;
            records.push(record);
        }

        let correct = records.iter().filter(|r| r.is_correct).count();
        let elapsed = start.elapsed();
        progress.on_run_complete(records.len(), correct, elapsed);

        let mut summaries = Vec::new();
        let mut seen_models: Vec<&str> = Vec::new();
        for spec in models {
            if seen_models.contains(&spec.model.as_str()) {
                continue;
            }
            seen_models.push(&spec.model);

            for &kind in &self.config.kinds {
                let kind_batch: Vec<EvaluationRecord> = records
                    .iter()
                    .filter(|r| r.model == spec.model && r.kind == kind)
                    .cloned()
                    .collect();
                if kind_batch.is_empty() {
                    continue;
                }

                let secs = ask_millis
                    .get(&(spec.model.clone(), kind))
                    .copied()
                    .unwrap_or(0) as f64
                    / 1000.0;

                summaries.push(summarize(
                    &kind_batch,
                    &format!("{kind}_{}", spec.model),
                    secs,
                    true,
                )?);

                // The robust all-or-nothing view only means something when
                // distractors were in play.
                if kind == QuestionKind::YesNo && self.config.options.falsy_year_count.is_some() {
                    summaries.push(summarize_grouped(
                        &kind_batch,
                        &format!("yes_no_robust_{}", spec.model),
                        secs,
                    )?);
                }
            }
        }

        Ok(RunReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            dataset: DatasetSummary {
                id: fact_set.id.clone(),
                name: fact_set.name.clone(),
                fact_count: fact_set.facts.len(),
            },
            models_evaluated: seen_models.iter().map(|m| m.to_string()).collect(),
            summaries,
            records,
            skipped: batch.skipped,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
