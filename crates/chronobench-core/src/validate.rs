//! Answer validation and record scoring.
//!
//! For every question kind there is a validity predicate (is the answer
//! well-formed enough to score?) and a correctness predicate (does it match
//! gold?). Both are total over arbitrary strings and return false on garbage
//! rather than failing: a model producing noise is expected data, not an
//! error. The only fallible step is the opt-in envelope strip, which fails
//! loudly on inputs too short to carry the envelope.

use crate::answer::{
    extract_duration, extract_two_years, extract_year, has_duration, strip_wrapper,
};
use crate::error::CoreError;
use crate::model::{Answer, EvaluationRecord, QuestionKind};

/// Whether the cleaned text is exactly a yes/no token.
pub fn is_yes_no(text: &str) -> bool {
    text == "yes" || text == "no"
}

/// Whether an extracted candidate looks like a year: 3 or 4 characters and
/// digit-shaped (leading digit 1-3 for the 4-digit case).
pub fn is_year_shaped(candidate: &str) -> bool {
    match candidate.len() {
        4 => {
            let mut chars = candidate.chars();
            matches!(chars.next(), Some('1'..='3'))
                && chars.all(|c| c.is_ascii_digit())
        }
        3 => candidate.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Whether a valid single-year candidate falls inside the gold year list.
pub fn year_in_interval(gold_years: &[i32], candidate: &str, is_valid: bool) -> bool {
    if !is_valid {
        return false;
    }
    candidate
        .parse::<i32>()
        .map(|year| gold_years.contains(&year))
        .unwrap_or(false)
}

/// Whether a valid single-year candidate equals the gold year.
pub fn year_equals(gold: i32, candidate: &str, is_valid: bool) -> bool {
    is_valid && candidate.parse::<i32>() == Ok(gold)
}

/// Whether a valid year pair matches the first and last gold years.
pub fn bounds_match(gold_years: &[i32], candidates: &[String], is_valid: bool) -> bool {
    if !is_valid || candidates.len() != 2 {
        return false;
    }
    let (Some(&gold_first), Some(&gold_last)) = (gold_years.first(), gold_years.last()) else {
        return false;
    };
    candidates[0].parse::<i32>() == Ok(gold_first) && candidates[1].parse::<i32>() == Ok(gold_last)
}

/// How `score` should pre-process raw model answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawAnswerFormat {
    /// The answer text as-is (a provider already unwrapped it).
    #[default]
    Plain,
    /// The serialized inference payload; the fixed envelope is cut first.
    Enveloped,
}

/// Score one raw model answer against its gold answer.
///
/// Returns the normalized candidate plus the validity/correctness verdicts.
/// Only envelope stripping can fail; every parsing failure downstream is a
/// `false` verdict.
pub fn score(
    kind: QuestionKind,
    gold: &Answer,
    raw: &str,
    format: RawAnswerFormat,
) -> Result<(String, bool, bool), CoreError> {
    let cleaned = match format {
        RawAnswerFormat::Enveloped => strip_wrapper(raw)?,
        RawAnswerFormat::Plain => raw.to_lowercase(),
    };
    let cleaned = cleaned.trim().to_string();

    let scored = match (kind, gold) {
        (QuestionKind::YesNo, Answer::YesNo(gold_yes)) => {
            let valid = is_yes_no(&cleaned);
            let correct = valid && (cleaned == "yes") == *gold_yes;
            (cleaned, valid, correct)
        }
        (QuestionKind::SimpleWhen, Answer::Years(years)) => {
            let candidate = extract_year(&cleaned);
            let valid = is_year_shaped(&candidate);
            let correct = year_in_interval(years, &candidate, valid);
            (candidate, valid, correct)
        }
        (
            QuestionKind::From
            | QuestionKind::Until
            | QuestionKind::RightOpen
            | QuestionKind::LeftOpen,
            Answer::Year(gold_year),
        ) => {
            let candidate = extract_year(&cleaned);
            let valid = is_year_shaped(&candidate);
            let correct = year_equals(*gold_year, &candidate, valid);
            (candidate, valid, correct)
        }
        (QuestionKind::WhenToWhen, Answer::Years(years)) => {
            let candidates = extract_two_years(&cleaned);
            let valid = candidates.len() == 2;
            let correct = bounds_match(years, &candidates, valid);
            (candidates.join(", "), valid, correct)
        }
        (QuestionKind::Duration, Answer::Duration(gold_len)) => {
            let valid = has_duration(&cleaned);
            let value = extract_duration(&cleaned, valid);
            let correct = valid && value == Some(*gold_len as i64);
            let normalized = value.map(|v| v.to_string()).unwrap_or(cleaned);
            (normalized, valid, correct)
        }
        // A gold answer that does not fit the kind cannot be scored.
        _ => (cleaned, false, false),
    };

    Ok(scored)
}

/// Build a full evaluation record for one answered question.
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    kind: QuestionKind,
    model: &str,
    predicate: &str,
    group: usize,
    question_text: &str,
    gold: &Answer,
    raw: &str,
    format: RawAnswerFormat,
) -> Result<EvaluationRecord, CoreError> {
    let (normalized, is_valid, is_correct) = score(kind, gold, raw, format)?;
    Ok(EvaluationRecord {
        kind,
        model: model.to_string(),
        predicate: predicate.to_string(),
        group,
        question_text: question_text.to_string(),
        gold_answer: gold.clone(),
        raw_model_answer: raw.to_string(),
        normalized_model_answer: normalized,
        is_valid,
        is_correct,
    })
}
