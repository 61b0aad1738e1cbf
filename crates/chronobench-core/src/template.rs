//! Question template composition and per-predicate overrides.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::model::{Answer, Question, QuestionKind};

/// One alternative phrasing for the opening of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadVariant {
    /// Prepended to the body: "Until which year" + " " + body.
    Plain(String),
    /// Wraps the body mid-sentence: lead + " " + body-without-"?" + " " + tail.
    /// Used for constructions like "When was S P O the last time?".
    Framed { lead: String, tail: String },
}

impl HeadVariant {
    pub fn plain(text: &str) -> Self {
        HeadVariant::Plain(text.to_string())
    }

    pub fn framed(lead: &str, tail: &str) -> Self {
        HeadVariant::Framed {
            lead: lead.to_string(),
            tail: tail.to_string(),
        }
    }
}

/// Append one question per head variant to `out`, all sharing `answer`.
///
/// The body is expected to end with "?"; framed variants strip it before
/// embedding.
pub fn compose_into(
    heads: &[HeadVariant],
    body: &str,
    answer: &Answer,
    out: &mut Vec<Question>,
) {
    for head in heads {
        let text = match head {
            HeadVariant::Plain(lead) => format!("{lead} {body}"),
            HeadVariant::Framed { lead, tail } => {
                let trimmed = body.strip_suffix('?').unwrap_or(body);
                format!("{lead} {trimmed} {tail}")
            }
        };
        out.push(Question {
            text,
            answer: answer.clone(),
        });
    }
}

/// Convenience wrapper returning a fresh list.
pub fn compose(heads: &[HeadVariant], body: &str, answer: &Answer) -> Vec<Question> {
    let mut out = Vec::with_capacity(heads.len());
    compose_into(heads, body, answer, &mut out);
    out
}

/// A caller-supplied format template with positional `{}` slots.
///
/// Used to patch predicates whose auto-generated phrasing is ungrammatical,
/// e.g. "was born in" => "Was {} born in {} in {}?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTemplate {
    pattern: String,
    slots: usize,
}

impl CustomTemplate {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            slots: pattern.matches("{}").count(),
        }
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Substitute `args` into the `{}` slots in order.
    ///
    /// Callers pass exactly `slots()` arguments; the overrides registry
    /// guarantees the count matches the question kind.
    pub fn render(&self, args: &[&str]) -> String {
        debug_assert_eq!(args.len(), self.slots);
        let mut result = String::with_capacity(self.pattern.len());
        let mut rest = self.pattern.as_str();
        let mut args = args.iter();
        while let Some(at) = rest.find("{}") {
            result.push_str(&rest[..at]);
            if let Some(arg) = args.next() {
                result.push_str(arg);
            }
            rest = &rest[at + 2..];
        }
        result.push_str(rest);
        result
    }
}

/// Per-(kind, predicate) custom templates, validated at registration.
///
/// Registration rejects templates whose `{}` count does not match the slot
/// count the kind substitutes, so malformed overrides surface when they are
/// configured instead of as garbled questions mid-run.
#[derive(Debug, Clone, Default)]
pub struct TemplateOverrides {
    templates: HashMap<(QuestionKind, String), CustomTemplate>,
}

impl TemplateOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template for a predicate under one question kind.
    pub fn set(
        &mut self,
        kind: QuestionKind,
        predicate: &str,
        pattern: &str,
    ) -> Result<(), CoreError> {
        let template = CustomTemplate::new(pattern);
        let expected = kind.template_arity();
        if template.slots() != expected {
            return Err(CoreError::InvalidTemplateShape {
                kind: kind.to_string(),
                expected,
                found: template.slots(),
            });
        }
        self.templates
            .insert((kind, predicate.to_string()), template);
        Ok(())
    }

    pub fn get(&self, kind: QuestionKind, predicate: &str) -> Option<&CustomTemplate> {
        self.templates.get(&(kind, predicate.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_head_prepends() {
        let questions = compose(
            &[HeadVariant::plain("In which year")],
            "was Obama president of USA?",
            &Answer::Year(2009),
        );
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "In which year was Obama president of USA?");
        assert_eq!(questions[0].answer, Answer::Year(2009));
    }

    #[test]
    fn framed_head_strips_question_mark() {
        let questions = compose(
            &[HeadVariant::framed("When", "the last time?")],
            "was Obama president of USA?",
            &Answer::Year(2017),
        );
        assert_eq!(
            questions[0].text,
            "When was Obama president of USA the last time?"
        );
    }

    #[test]
    fn multiple_heads_share_the_answer() {
        let questions = compose(
            &[
                HeadVariant::plain("From which year"),
                HeadVariant::plain("Since when"),
            ],
            "did Obama lead USA?",
            &Answer::Year(2009),
        );
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.answer == Answer::Year(2009)));
    }

    #[test]
    fn custom_template_renders_in_order() {
        let t = CustomTemplate::new("Was {} born in {} in {}?");
        assert_eq!(t.slots(), 3);
        assert_eq!(
            t.render(&["Obama", "Hawaii", "1961"]),
            "Was Obama born in Hawaii in 1961?"
        );
    }

    #[test]
    fn overrides_reject_wrong_arity() {
        let mut overrides = TemplateOverrides::new();
        let err = overrides
            .set(QuestionKind::YesNo, "was born in", "Was {} born in {}?")
            .unwrap_err();
        assert!(err.to_string().contains("expected 3"));

        overrides
            .set(QuestionKind::YesNo, "was born in", "Was {} born in {} in {}?")
            .unwrap();
        assert!(overrides.get(QuestionKind::YesNo, "was born in").is_some());
        assert!(overrides.get(QuestionKind::SimpleWhen, "was born in").is_none());
    }
}
