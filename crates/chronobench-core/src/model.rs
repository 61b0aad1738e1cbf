//! Core data model types for chronobench.
//!
//! These are the fundamental types the entire system uses to represent
//! temporal facts, generated questions, and scored answers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A year as it appears in a fact file: either a bare integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Num(i64),
    Text(String),
}

impl From<i64> for YearValue {
    fn from(v: i64) -> Self {
        YearValue::Num(v)
    }
}

impl From<&str> for YearValue {
    fn from(v: &str) -> Self {
        YearValue::Text(v.to_string())
    }
}

impl fmt::Display for YearValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearValue::Num(n) => write!(f, "{n}"),
            YearValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A temporally-scoped relation from a knowledge graph.
///
/// `time_until` is optional; a fact with only `time_from` holds at a single
/// point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Subject of the relation (e.g. "Obama").
    pub subject: String,
    /// Predicate phrase (e.g. "was president of").
    pub predicate: String,
    /// Object of the relation (e.g. "USA").
    pub object: String,
    /// Year the relation starts to hold.
    pub time_from: YearValue,
    /// Year the relation stops holding, if it spans more than a point.
    #[serde(default)]
    pub time_until: Option<YearValue>,
}

impl Fact {
    /// A fact holding at a single year.
    pub fn at(subject: &str, predicate: &str, object: &str, year: i64) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
            time_from: YearValue::Num(year),
            time_until: None,
        }
    }

    /// A fact spanning an inclusive year range.
    pub fn spanning(subject: &str, predicate: &str, object: &str, from: i64, until: i64) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
            time_from: YearValue::Num(from),
            time_until: Some(YearValue::Num(until)),
        }
    }
}

/// A collection of facts loaded from one fact-set file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSet {
    /// Unique identifier for this fact set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of where the facts come from.
    #[serde(default)]
    pub description: String,
    /// The facts in this set.
    #[serde(default)]
    pub facts: Vec<Fact>,
}

/// A normalized year interval.
///
/// Invariant: `start <= end`. `is_interval` is true iff two distinct years
/// were supplied before normalization, so a degenerate `[y, y]` span from an
/// omitted `time_until` reports false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: i32,
    pub end: i32,
    pub is_interval: bool,
}

/// The question styles chronobench can generate and score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// "Was S P O in the year Y?", answered yes or no.
    YesNo,
    /// "In which year was S P O?", answered with any year the fact holds.
    SimpleWhen,
    /// "From which year until which year was S P O?", answered with both bounds.
    WhenToWhen,
    /// "From which year was S P O?", answered with the start year.
    From,
    /// "Until which year was S P O?", answered with the end year.
    Until,
    /// "From the year {start} until which year was S P O?", answered with the end year.
    RightOpen,
    /// "From which year until the year {end} was S P O?", answered with the start year.
    LeftOpen,
    /// "For how many years was S P O?", answered with end - start.
    Duration,
    /// Reserved; generators skip it.
    BeforeAfter,
    /// Reserved; generators skip it.
    While,
}

impl QuestionKind {
    /// All kinds that currently produce questions.
    pub const IMPLEMENTED: [QuestionKind; 8] = [
        QuestionKind::YesNo,
        QuestionKind::SimpleWhen,
        QuestionKind::WhenToWhen,
        QuestionKind::From,
        QuestionKind::Until,
        QuestionKind::RightOpen,
        QuestionKind::LeftOpen,
        QuestionKind::Duration,
    ];

    /// Number of `{}` slots a custom template for this kind must carry.
    ///
    /// Yes/no templates receive (subject, object, year); the open-interval
    /// templates receive (year, subject, object); everything else receives
    /// (subject, object).
    pub fn template_arity(&self) -> usize {
        match self {
            QuestionKind::YesNo | QuestionKind::RightOpen | QuestionKind::LeftOpen => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionKind::YesNo => "yes_no",
            QuestionKind::SimpleWhen => "simple_when",
            QuestionKind::WhenToWhen => "when_to_when",
            QuestionKind::From => "from",
            QuestionKind::Until => "until",
            QuestionKind::RightOpen => "right_open",
            QuestionKind::LeftOpen => "left_open",
            QuestionKind::Duration => "duration",
            QuestionKind::BeforeAfter => "before_after",
            QuestionKind::While => "while",
        };
        write!(f, "{name}")
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes_no" | "yes-no" => Ok(QuestionKind::YesNo),
            "simple_when" | "when" => Ok(QuestionKind::SimpleWhen),
            "when_to_when" => Ok(QuestionKind::WhenToWhen),
            "from" => Ok(QuestionKind::From),
            "until" | "until_when" => Ok(QuestionKind::Until),
            "right_open" => Ok(QuestionKind::RightOpen),
            "left_open" => Ok(QuestionKind::LeftOpen),
            "duration" => Ok(QuestionKind::Duration),
            "before_after" => Ok(QuestionKind::BeforeAfter),
            "while" => Ok(QuestionKind::While),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// The gold answer attached to a generated question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// "yes" or "no".
    YesNo(bool),
    /// A single year.
    Year(i32),
    /// Every year the fact holds, ascending. Scoring of when-to-when answers
    /// consults the first and last entries as an ordered pair.
    Years(Vec<i32>),
    /// A span length in years.
    Duration(i32),
}

impl Answer {
    /// The canonical token for a yes/no answer.
    pub fn yes_no_token(&self) -> Option<&'static str> {
        match self {
            Answer::YesNo(true) => Some("yes"),
            Answer::YesNo(false) => Some("no"),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::YesNo(v) => write!(f, "{}", if *v { "yes" } else { "no" }),
            Answer::Year(y) => write!(f, "{y}"),
            Answer::Years(ys) => {
                let parts: Vec<String> = ys.iter().map(|y| y.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
            Answer::Duration(d) => write!(f, "{d}"),
        }
    }
}

/// A generated natural-language question and its gold answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answer: Answer,
}

/// One scored model answer.
///
/// `is_valid` and `is_correct` are derived by the validator, never set
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Which generator produced the question.
    pub kind: QuestionKind,
    /// Model that answered the question.
    pub model: String,
    /// Predicate of the source fact; drives the per-predicate breakdown.
    pub predicate: String,
    /// Ordinal of the source fact within its fact set; drives grouped
    /// (all-sub-questions-correct) summaries.
    pub group: usize,
    /// The question that was asked.
    pub question_text: String,
    /// The canonical correct answer.
    pub gold_answer: Answer,
    /// The model's answer exactly as received.
    pub raw_model_answer: String,
    /// The answer after envelope stripping, lowercasing, and extraction.
    pub normalized_model_answer: String,
    /// Whether the answer was well-formed enough to score.
    pub is_valid: bool,
    /// Whether the answer matched gold. Never true when `is_valid` is false.
    pub is_correct: bool,
}

/// Per-predicate slice of a summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateStats {
    pub correct: usize,
    pub valid: usize,
    pub size: usize,
}

/// Correctness summary over one batch of evaluation records.
///
/// Recomputed on every evaluation run; nothing is cached across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Label of the question type this summary covers.
    pub question_type: String,
    /// Number of records scored.
    pub size: usize,
    /// Records whose answers were well-formed.
    pub valid_count: usize,
    /// Records whose answers matched gold.
    pub correct_count: usize,
    /// correct_count / size.
    pub correct_percentage: f64,
    /// Wall-clock time spent producing the batch, as "N min M sec".
    pub time_processed: String,
    /// Per-predicate breakdown, when requested.
    #[serde(default)]
    pub per_predicate: BTreeMap<String, PredicateStats>,
    /// Groups (source facts) whose every record was correct. Present only on
    /// grouped summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correctly_answered_groups: Option<usize>,
    /// correctly_answered_groups / group count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correctly_answered_groups_percentage: Option<f64>,
}
