//! Correctness aggregation over evaluation records.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::model::{EvaluationRecord, PredicateStats, SummaryResult};
use crate::time::format_elapsed;

/// Summarize one batch of records for a single question type.
///
/// Fails on an empty batch: the percentage would be 0/0, and an empty batch
/// almost always means the caller forgot to filter skipped generators.
/// `per_predicate` toggles the by-predicate breakdown.
pub fn summarize(
    records: &[EvaluationRecord],
    question_type: &str,
    elapsed_secs: f64,
    per_predicate: bool,
) -> Result<SummaryResult, CoreError> {
    if records.is_empty() {
        return Err(CoreError::EmptyBatch);
    }

    let size = records.len();
    let valid_count = records.iter().filter(|r| r.is_valid).count();
    let correct_count = records.iter().filter(|r| r.is_correct).count();

    let mut breakdown: BTreeMap<String, PredicateStats> = BTreeMap::new();
    if per_predicate {
        for record in records {
            let stats = breakdown.entry(record.predicate.clone()).or_default();
            stats.size += 1;
            if record.is_valid {
                stats.valid += 1;
            }
            if record.is_correct {
                stats.correct += 1;
            }
        }
    }

    Ok(SummaryResult {
        question_type: question_type.to_string(),
        size,
        valid_count,
        correct_count,
        correct_percentage: correct_count as f64 / size as f64,
        time_processed: format_elapsed(elapsed_secs),
        per_predicate: breakdown,
        correctly_answered_groups: None,
        correctly_answered_groups_percentage: None,
    })
}

/// Summarize with an all-or-nothing verdict per record group.
///
/// Groups are source facts: a fact counts as correctly answered only when
/// every one of its sub-questions (true years and distractors alike) was
/// answered correctly. Used for the robust yes/no evaluation; the
/// per-predicate breakdown is off for this summary style.
pub fn summarize_grouped(
    records: &[EvaluationRecord],
    question_type: &str,
    elapsed_secs: f64,
) -> Result<SummaryResult, CoreError> {
    let mut summary = summarize(records, question_type, elapsed_secs, false)?;

    let mut groups: BTreeMap<usize, bool> = BTreeMap::new();
    for record in records {
        let all_correct = groups.entry(record.group).or_insert(true);
        *all_correct &= record.is_correct;
    }

    let group_count = groups.len();
    let fully_correct = groups.values().filter(|ok| **ok).count();
    summary.correctly_answered_groups = Some(fully_correct);
    summary.correctly_answered_groups_percentage =
        Some(fully_correct as f64 / group_count as f64);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, QuestionKind};

    fn record(predicate: &str, group: usize, valid: bool, correct: bool) -> EvaluationRecord {
        EvaluationRecord {
            kind: QuestionKind::YesNo,
            model: "stub-model".to_string(),
            predicate: predicate.to_string(),
            group,
            question_text: "Was X Y in the year 2000?".to_string(),
            gold_answer: Answer::YesNo(true),
            raw_model_answer: "yes".to_string(),
            normalized_model_answer: "yes".to_string(),
            is_valid: valid,
            is_correct: correct,
        }
    }

    #[test]
    fn summarize_counts_and_percentage() {
        let records = vec![
            record("was president of", 0, true, true),
            record("was president of", 0, true, false),
            record("played for", 1, false, false),
            record("played for", 1, true, true),
        ];
        let summary = summarize(&records, "yes_no", 30.0, true).unwrap();
        assert_eq!(summary.size, 4);
        assert_eq!(summary.valid_count, 3);
        assert_eq!(summary.correct_count, 2);
        assert!((summary.correct_percentage - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.time_processed, "0 min 30 sec");

        let presidents = &summary.per_predicate["was president of"];
        assert_eq!(presidents.size, 2);
        assert_eq!(presidents.correct, 1);
        assert_eq!(presidents.valid, 2);
    }

    #[test]
    fn summarize_empty_batch_fails() {
        let err = summarize(&[], "yes_no", 0.0, false).unwrap_err();
        assert!(matches!(err, CoreError::EmptyBatch));
    }

    #[test]
    fn summarize_without_predicate_breakdown() {
        let records = vec![record("was president of", 0, true, true)];
        let summary = summarize(&records, "yes_no", 0.0, false).unwrap();
        assert!(summary.per_predicate.is_empty());
    }

    #[test]
    fn grouped_summary_requires_every_record_correct() {
        let records = vec![
            // group 0: all correct
            record("p", 0, true, true),
            record("p", 0, true, true),
            // group 1: one wrong answer spoils it
            record("p", 1, true, true),
            record("p", 1, true, false),
            // group 2: all correct
            record("q", 2, true, true),
        ];
        let summary = summarize_grouped(&records, "yes_no_robust", 12.0).unwrap();
        assert_eq!(summary.correctly_answered_groups, Some(2));
        let pct = summary.correctly_answered_groups_percentage.unwrap();
        assert!((pct - 2.0 / 3.0).abs() < 1e-9);
        assert!(summary.per_predicate.is_empty());
    }
}
