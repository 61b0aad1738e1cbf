//! Template-driven question generators.
//!
//! Each generator turns one temporal fact into a sequence of natural-language
//! question/answer pairs. Generators that need a genuine multi-year span
//! return a tagged skip for point facts instead of an empty list, so callers
//! can tell "nothing to ask" apart from "asked nothing".

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Answer, Fact, Interval, Question, QuestionKind};
use crate::predicate::{PredicateProcessor, ProcessedPredicate};
use crate::template::{compose, HeadVariant, TemplateOverrides};
use crate::time::{enumerate_years, normalize};
use crate::traits::Lemmatizer;

/// Why a generator produced no questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The kind needs two distinct years and the fact holds at a point.
    IntervalRequired,
    /// The kind is reserved and has no generator yet.
    NotImplemented,
}

/// Result of running one generator against one fact.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorOutcome {
    Questions(Vec<Question>),
    Skipped(SkipReason),
}

impl GeneratorOutcome {
    pub fn questions(&self) -> Option<&[Question]> {
        match self {
            GeneratorOutcome::Questions(qs) => Some(qs),
            GeneratorOutcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, GeneratorOutcome::Skipped(_))
    }
}

/// Knobs shared by every generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Per-(kind, predicate) template patches.
    pub overrides: TemplateOverrides,
    /// Replace predicate tokens with their lemmas where grammar allows.
    pub lemmatize: bool,
    /// "in the year 2009" / "In which year" phrasing instead of
    /// "in 2009" / "When". Textual only; answers are unaffected.
    pub show_year_hint: bool,
    /// Gold token for the true years of yes/no questions. Setting this to
    /// false generates deliberately false-premise batches.
    pub assume_time_correct: bool,
    /// When set to n, yes/no generation adds n years below the interval and
    /// n above it, each answered "no", ahead of the true years.
    pub falsy_year_count: Option<u32>,
    /// Ask a yes/no question for every year of the interval rather than only
    /// its first year.
    pub all_interval_years: bool,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self {
            overrides: TemplateOverrides::new(),
            lemmatize: true,
            show_year_hint: true,
            assume_time_correct: true,
            falsy_year_count: None,
            all_interval_years: false,
        }
    }
}

/// A question annotated with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub kind: QuestionKind,
    /// Ordinal of the source fact; becomes the record group for grouped
    /// summaries.
    pub fact_index: usize,
    pub predicate: String,
    pub question: Question,
}

/// Everything one generation pass produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedBatch {
    pub questions: Vec<GeneratedQuestion>,
    /// Kind label -> number of facts the kind skipped.
    pub skipped: std::collections::BTreeMap<String, usize>,
}

/// Generates questions from facts.
///
/// Holds the injected lemmatizer and an options bundle; one instance is
/// reused across a whole fact set.
pub struct QuestionGenerator<'a> {
    lemmatizer: &'a dyn Lemmatizer,
    options: GeneratorOptions,
}

impl<'a> QuestionGenerator<'a> {
    pub fn new(lemmatizer: &'a dyn Lemmatizer, options: GeneratorOptions) -> Self {
        Self {
            lemmatizer,
            options,
        }
    }

    /// Run the generator for `kind` against `fact`.
    pub fn generate(&self, kind: QuestionKind, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        match kind {
            QuestionKind::YesNo => self.yes_no(fact),
            QuestionKind::SimpleWhen => self.simple_when(fact),
            QuestionKind::WhenToWhen => self.when_to_when(fact),
            QuestionKind::From => self.from_question(fact),
            QuestionKind::Until => self.until_question(fact),
            QuestionKind::RightOpen => self.right_open(fact),
            QuestionKind::LeftOpen => self.left_open(fact),
            QuestionKind::Duration => self.duration(fact),
            QuestionKind::BeforeAfter | QuestionKind::While => {
                Ok(GeneratorOutcome::Skipped(SkipReason::NotImplemented))
            }
        }
    }

    /// Yes/no questions, one per target year.
    ///
    /// For `Obama / was president of / USA / 2009` this yields
    /// "Was Obama president of USA in the year 2009?" answered "yes".
    /// Distractor years (when configured) come first, each answered "no".
    pub fn yes_no(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        let interval = normalize(&fact.time_from, fact.time_until.as_ref())?;

        if let Some(template) = self.options.overrides.get(QuestionKind::YesNo, &fact.predicate) {
            let questions = self.yes_no_over_years(interval, |year| {
                template.render(&[&fact.subject, &fact.object, &year.to_string()])
            });
            return Ok(GeneratorOutcome::Questions(questions));
        }

        let predicate = self.process_predicate(&fact.predicate);
        let opening = if predicate.leading_aux.uses_was() {
            "Was"
        } else {
            "Did"
        };
        let year_phrase = if self.options.show_year_hint {
            "in the year"
        } else {
            "in"
        };

        let questions = self.yes_no_over_years(interval, |year| {
            format!(
                "{opening} {} {} {} {year_phrase} {year}?",
                fact.subject, predicate.text, fact.object
            )
        });
        Ok(GeneratorOutcome::Questions(questions))
    }

    fn yes_no_over_years(&self, interval: Interval, render: impl Fn(i32) -> String) -> Vec<Question> {
        let (start, end) = if self.options.all_interval_years {
            (interval.start, interval.end)
        } else {
            (interval.start, interval.start)
        };

        let falsy_years: Vec<i32> = match self.options.falsy_year_count {
            Some(n) => {
                let n = n as i32;
                enumerate_years(start - n, start - 1)
                    .into_iter()
                    .chain(enumerate_years(end + 1, end + n))
                    .collect()
            }
            None => Vec::new(),
        };

        let truth = self.options.assume_time_correct;
        let mut questions = Vec::new();
        for year in &falsy_years {
            questions.push(Question {
                text: render(*year),
                answer: Answer::YesNo(false),
            });
        }
        for year in enumerate_years(start, end) {
            questions.push(Question {
                text: render(year),
                answer: Answer::YesNo(truth),
            });
        }
        questions
    }

    /// "In which year was S P O?", answered with every year the fact holds.
    pub fn simple_when(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        let interval = normalize(&fact.time_from, fact.time_until.as_ref())?;
        let answer = Answer::Years(enumerate_years(interval.start, interval.end));

        if let Some(template) = self
            .options
            .overrides
            .get(QuestionKind::SimpleWhen, &fact.predicate)
        {
            return Ok(GeneratorOutcome::Questions(vec![Question {
                text: template.render(&[&fact.subject, &fact.object]),
                answer,
            }]));
        }

        let head = if self.options.show_year_hint {
            "In which year"
        } else {
            "When"
        };
        let predicate = self.process_predicate(&fact.predicate);
        let body = self.body(&predicate, fact);

        Ok(GeneratorOutcome::Questions(compose(
            &[HeadVariant::plain(head)],
            &body,
            &answer,
        )))
    }

    /// "From which year until which year was S P O?". Needs a true interval.
    pub fn when_to_when(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        let interval = normalize(&fact.time_from, fact.time_until.as_ref())?;
        if !interval.is_interval {
            return Ok(GeneratorOutcome::Skipped(SkipReason::IntervalRequired));
        }
        let answer = Answer::Years(enumerate_years(interval.start, interval.end));

        if let Some(template) = self
            .options
            .overrides
            .get(QuestionKind::WhenToWhen, &fact.predicate)
        {
            return Ok(GeneratorOutcome::Questions(vec![Question {
                text: template.render(&[&fact.subject, &fact.object]),
                answer,
            }]));
        }

        let head = if self.options.show_year_hint {
            "From which year until which year"
        } else {
            "From when to when"
        };
        let predicate = self.process_predicate(&fact.predicate);
        let body = self.body(&predicate, fact);

        Ok(GeneratorOutcome::Questions(compose(
            &[HeadVariant::plain(head)],
            &body,
            &answer,
        )))
    }

    /// "From which year was S P O?", answered with the start year.
    pub fn from_question(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        self.boundary_question(fact, QuestionKind::From)
    }

    /// "Until which year was S P O?", answered with the end year.
    pub fn until_question(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        self.boundary_question(fact, QuestionKind::Until)
    }

    fn boundary_question(
        &self,
        fact: &Fact,
        kind: QuestionKind,
    ) -> Result<GeneratorOutcome, CoreError> {
        let interval = normalize(&fact.time_from, fact.time_until.as_ref())?;
        if !interval.is_interval {
            return Ok(GeneratorOutcome::Skipped(SkipReason::IntervalRequired));
        }
        let answer = match kind {
            QuestionKind::From => Answer::Year(interval.start),
            _ => Answer::Year(interval.end),
        };

        if let Some(template) = self.options.overrides.get(kind, &fact.predicate) {
            return Ok(GeneratorOutcome::Questions(vec![Question {
                text: template.render(&[&fact.subject, &fact.object]),
                answer,
            }]));
        }

        let head = match (kind, self.options.show_year_hint) {
            (QuestionKind::From, true) => "From which year",
            (QuestionKind::From, false) => "Since when",
            (_, true) => "Until which year",
            (_, false) => "Until when",
        };
        let predicate = self.process_predicate(&fact.predicate);
        let body = self.body(&predicate, fact);

        Ok(GeneratorOutcome::Questions(compose(
            &[HeadVariant::plain(head)],
            &body,
            &answer,
        )))
    }

    /// "From the year {start} until which year was S P O?", answered with
    /// the end year.
    pub fn right_open(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        self.open_interval(fact, QuestionKind::RightOpen)
    }

    /// "From which year until the year {end} was S P O?", answered with the
    /// start year.
    pub fn left_open(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        self.open_interval(fact, QuestionKind::LeftOpen)
    }

    fn open_interval(
        &self,
        fact: &Fact,
        kind: QuestionKind,
    ) -> Result<GeneratorOutcome, CoreError> {
        let interval = normalize(&fact.time_from, fact.time_until.as_ref())?;
        if !interval.is_interval {
            return Ok(GeneratorOutcome::Skipped(SkipReason::IntervalRequired));
        }

        let right_open = kind == QuestionKind::RightOpen;
        let answer = if right_open {
            Answer::Year(interval.end)
        } else {
            Answer::Year(interval.start)
        };

        if let Some(template) = self.options.overrides.get(kind, &fact.predicate) {
            // Custom templates for the open kinds name the bound the answer
            // is not: "Until the year {end} … and when was the election?"
            // asks about the start.
            let (shown, asked) = if right_open {
                (interval.end, interval.start)
            } else {
                (interval.start, interval.end)
            };
            return Ok(GeneratorOutcome::Questions(vec![Question {
                text: template.render(&[&shown.to_string(), &fact.subject, &fact.object]),
                answer: Answer::Year(asked),
            }]));
        }

        let head = match (right_open, self.options.show_year_hint) {
            (true, true) => format!("From the year {} until which year", interval.start),
            (true, false) => format!("From {} until when", interval.start),
            (false, true) => format!("From which year until the year {}", interval.end),
            (false, false) => format!("From when until {}", interval.end),
        };
        let predicate = self.process_predicate(&fact.predicate);
        let body = self.body(&predicate, fact);

        Ok(GeneratorOutcome::Questions(compose(
            &[HeadVariant::Plain(head)],
            &body,
            &answer,
        )))
    }

    /// "For how many years was S P O?", answered with end - start.
    pub fn duration(&self, fact: &Fact) -> Result<GeneratorOutcome, CoreError> {
        let interval = normalize(&fact.time_from, fact.time_until.as_ref())?;
        if !interval.is_interval {
            return Ok(GeneratorOutcome::Skipped(SkipReason::IntervalRequired));
        }
        let answer = Answer::Duration(interval.end - interval.start);

        if let Some(template) = self
            .options
            .overrides
            .get(QuestionKind::Duration, &fact.predicate)
        {
            return Ok(GeneratorOutcome::Questions(vec![Question {
                text: template.render(&[&fact.subject, &fact.object]),
                answer,
            }]));
        }

        let predicate = self.process_predicate(&fact.predicate);
        let verb = if predicate.leading_aux.uses_was() {
            "was"
        } else {
            "did"
        };
        // The verb sits in the head for this kind, so the body carries none.
        let head = if self.options.show_year_hint {
            format!("For how many years {verb}")
        } else {
            format!("For how long {verb}")
        };
        let body = format!("{} {} {}?", fact.subject, predicate.text, fact.object);

        Ok(GeneratorOutcome::Questions(compose(
            &[HeadVariant::Plain(head)],
            &body,
            &answer,
        )))
    }

    /// Run the configured kinds over a whole fact set.
    ///
    /// Skips are counted per kind, not dropped silently.
    pub fn generate_batch(
        &self,
        kinds: &[QuestionKind],
        facts: &[Fact],
    ) -> Result<GeneratedBatch, CoreError> {
        let mut batch = GeneratedBatch::default();
        for (fact_index, fact) in facts.iter().enumerate() {
            for &kind in kinds {
                match self.generate(kind, fact)? {
                    GeneratorOutcome::Questions(questions) => {
                        for question in questions {
                            batch.questions.push(GeneratedQuestion {
                                kind,
                                fact_index,
                                predicate: fact.predicate.clone(),
                                question,
                            });
                        }
                    }
                    GeneratorOutcome::Skipped(reason) => {
                        tracing::debug!(
                            kind = %kind,
                            fact_index,
                            ?reason,
                            "generator skipped fact"
                        );
                        *batch.skipped.entry(kind.to_string()).or_default() += 1;
                    }
                }
            }
        }
        Ok(batch)
    }

    fn process_predicate(&self, predicate: &str) -> ProcessedPredicate {
        PredicateProcessor::new(self.lemmatizer).process(predicate, self.options.lemmatize)
    }

    fn body(&self, predicate: &ProcessedPredicate, fact: &Fact) -> String {
        let verb = if predicate.leading_aux.uses_was() {
            "was"
        } else {
            "did"
        };
        format!(
            "{verb} {} {} {}?",
            fact.subject, predicate.text, fact.object
        )
    }
}
