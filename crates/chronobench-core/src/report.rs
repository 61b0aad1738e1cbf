//! Run reports with JSON persistence and baseline comparison.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{EvaluationRecord, SummaryResult};

/// A complete eval run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the run finished.
    pub created_at: DateTime<Utc>,
    /// Summary of the fact set that was asked about.
    pub dataset: DatasetSummary,
    /// Models that were evaluated.
    pub models_evaluated: Vec<String>,
    /// Per-(kind, model) correctness summaries.
    pub summaries: Vec<SummaryResult>,
    /// Every scored record.
    pub records: Vec<EvaluationRecord>,
    /// Kind label -> facts the kind's generator skipped.
    #[serde(default)]
    pub skipped: BTreeMap<String, usize>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a fact set (without the facts themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: String,
    pub name: String,
    pub fact_count: usize,
}

impl RunReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: RunReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline to detect score movement.
    ///
    /// Summaries pair up by question_type label; the comparison metric is
    /// correct_percentage.
    pub fn compare(&self, baseline: &RunReport, threshold: f64) -> ComparisonReport {
        let percentages = |report: &RunReport| -> BTreeMap<String, f64> {
            report
                .summaries
                .iter()
                .map(|s| (s.question_type.clone(), s.correct_percentage))
                .collect()
        };

        let baseline_scores = percentages(baseline);
        let current_scores = percentages(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_types = 0usize;

        for (question_type, &current) in &current_scores {
            if let Some(&base) = baseline_scores.get(question_type) {
                let delta = current - base;
                if delta < -threshold {
                    regressions.push(ScoreDelta {
                        question_type: question_type.clone(),
                        baseline_percentage: base,
                        current_percentage: current,
                        delta,
                    });
                } else if delta > threshold {
                    improvements.push(ScoreDelta {
                        question_type: question_type.clone(),
                        baseline_percentage: base,
                        current_percentage: current,
                        delta,
                    });
                } else {
                    unchanged += 1;
                }
            } else {
                new_types += 1;
            }
        }

        let removed_types = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        ComparisonReport {
            regressions,
            improvements,
            unchanged,
            new_types,
            removed_types,
        }
    }
}

/// Result of comparing two runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Question types whose score went down.
    pub regressions: Vec<ScoreDelta>,
    /// Question types whose score went up.
    pub improvements: Vec<ScoreDelta>,
    /// Types with no significant change.
    pub unchanged: usize,
    /// Types in current but not baseline.
    pub new_types: usize,
    /// Types in baseline but not current.
    pub removed_types: usize,
}

/// A score movement on one question type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub question_type: String,
    pub baseline_percentage: f64,
    pub current_percentage: f64,
    pub delta: f64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str("| Question type | Baseline | Current | Delta |\n");
            md.push_str("|---------------|----------|---------|-------|\n");
            for r in &self.regressions {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:.1}% |\n",
                    r.question_type,
                    r.baseline_percentage * 100.0,
                    r.current_percentage * 100.0,
                    r.delta * 100.0
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Question type | Baseline | Current | Delta |\n");
            md.push_str("|---------------|----------|---------|-------|\n");
            for i in &self.improvements {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | +{:.1}% |\n",
                    i.question_type,
                    i.baseline_percentage * 100.0,
                    i.current_percentage * 100.0,
                    i.delta * 100.0
                ));
            }
        }

        md
    }

    /// Returns true if any question type regressed.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, QuestionKind};
    use crate::statistics::summarize;
    use crate::validate::{evaluate, RawAnswerFormat};

    fn scored_record(raw: &str) -> EvaluationRecord {
        evaluate(
            QuestionKind::YesNo,
            "model-a",
            "was president of",
            0,
            "Was Obama president of USA in the year 2009?",
            &Answer::YesNo(true),
            raw,
            RawAnswerFormat::Plain,
        )
        .unwrap()
    }

    fn make_report(correct_of_two: usize) -> RunReport {
        let records: Vec<EvaluationRecord> = (0..2)
            .map(|i| scored_record(if i < correct_of_two { "yes" } else { "no" }))
            .collect();
        let summary = summarize(&records, "yes_no_model-a", 1.0, false).unwrap();
        RunReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            dataset: DatasetSummary {
                id: "test".into(),
                name: "Test".into(),
                fact_count: 1,
            },
            models_evaluated: vec!["model-a".into()],
            summaries: vec![summary],
            records,
            skipped: BTreeMap::new(),
            duration_ms: 0,
        }
    }

    #[test]
    fn compare_identical_reports() {
        let baseline = make_report(2);
        let current = make_report(2);
        let comparison = current.compare(&baseline, 0.05);
        assert!(comparison.regressions.is_empty());
        assert!(comparison.improvements.is_empty());
        assert_eq!(comparison.unchanged, 1);
    }

    #[test]
    fn compare_detects_regression() {
        let baseline = make_report(2);
        let current = make_report(1);
        let comparison = current.compare(&baseline, 0.05);
        assert_eq!(comparison.regressions.len(), 1);
        assert_eq!(comparison.regressions[0].question_type, "yes_no_model-a");
        assert!(comparison.has_regressions());
    }

    #[test]
    fn compare_detects_improvement() {
        let baseline = make_report(1);
        let current = make_report(2);
        let comparison = current.compare(&baseline, 0.05);
        assert_eq!(comparison.improvements.len(), 1);
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(2);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = RunReport::load_json(&path).unwrap();

        assert_eq!(loaded.dataset.id, "test");
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.summaries.len(), 1);
    }

    #[test]
    fn markdown_output() {
        let baseline = make_report(2);
        let current = make_report(0);
        let md = current.compare(&baseline, 0.05).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("yes_no_model-a"));
    }
}
