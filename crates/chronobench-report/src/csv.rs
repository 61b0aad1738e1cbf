//! Flat CSV export of evaluation records.

use std::path::Path;

use anyhow::{Context, Result};

use chronobench_core::report::RunReport;

const HEADER: &str = "kind,model,predicate,group,question,gold_answer,raw_model_answer,normalized_model_answer,is_valid,is_correct";

/// Quote a field per RFC 4180 when it needs it.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render a run report's records as CSV.
pub fn generate_csv(report: &RunReport) -> String {
    let mut csv = String::new();
    csv.push_str(HEADER);
    csv.push('\n');

    for record in &report.records {
        let row = [
            record.kind.to_string(),
            record.model.clone(),
            record.predicate.clone(),
            record.group.to_string(),
            record.question_text.clone(),
            record.gold_answer.to_string(),
            record.raw_model_answer.clone(),
            record.normalized_model_answer.clone(),
            record.is_valid.to_string(),
            record.is_correct.to_string(),
        ];
        let encoded: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        csv.push_str(&encoded.join(","));
        csv.push('\n');
    }

    csv
}

/// Write the CSV export to a file.
pub fn write_csv_records(report: &RunReport, path: &Path) -> Result<()> {
    let csv = generate_csv(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)
        .with_context(|| format!("failed to write CSV to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronobench_core::model::{Answer, QuestionKind};
    use chronobench_core::report::DatasetSummary;
    use chronobench_core::validate::{evaluate, RawAnswerFormat};
    use std::collections::BTreeMap;

    fn report_with_one_record(raw: &str) -> RunReport {
        let record = evaluate(
            QuestionKind::SimpleWhen,
            "mock-model",
            "was president of",
            0,
            "In which year was Obama president of USA?",
            &Answer::Years(vec![2009]),
            raw,
            RawAnswerFormat::Plain,
        )
        .unwrap();

        RunReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            dataset: DatasetSummary {
                id: "test".into(),
                name: "Test".into(),
                fact_count: 1,
            },
            models_evaluated: vec!["mock-model".into()],
            summaries: vec![],
            records: vec![record],
            skipped: BTreeMap::new(),
            duration_ms: 0,
        }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = generate_csv(&report_with_one_record("2009"));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("kind,model,predicate"));
        assert!(lines[1].starts_with("simple_when,mock-model,was president of,0,"));
        assert!(lines[1].ends_with("true,true"));
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let csv = generate_csv(&report_with_one_record("2009, I believe"));
        assert!(csv.contains("\"2009, I believe\""));
    }

    #[test]
    fn write_csv_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        write_csv_records(&report_with_one_record("2009"), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("simple_when"));
    }
}
