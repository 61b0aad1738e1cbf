//! Predicate phrase processing.
//!
//! Knowledge-graph predicates arrive as surface phrases like "was president
//! of" or "has won prize". Question templates need the bare verb phrase
//! ("president of", "win prize") plus a note of which auxiliary led the
//! phrase, since that decides between "Was S … O?" and "Did S … O?".

use serde::{Deserialize, Serialize};

use crate::traits::Lemmatizer;

/// Which auxiliary verb opened the predicate phrase, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadingAux {
    /// A form of "to be" ("is", "was", "were", …).
    Be,
    /// A form of "to have" ("has", "had", …).
    Have,
    /// The phrase starts with a content word.
    None,
}

impl LeadingAux {
    /// Returns `true` for predicates that pair with "was" rather than "did".
    pub fn uses_was(&self) -> bool {
        matches!(self, LeadingAux::Be)
    }
}

/// A predicate ready for template insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedPredicate {
    /// The phrase with any leading auxiliary removed, tokens rejoined with
    /// single spaces.
    pub text: String,
    /// The auxiliary that was stripped.
    pub leading_aux: LeadingAux,
}

/// Lemmatizes predicates and strips leading auxiliaries.
pub struct PredicateProcessor<'a> {
    lemmatizer: &'a dyn Lemmatizer,
}

impl<'a> PredicateProcessor<'a> {
    pub fn new(lemmatizer: &'a dyn Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    /// Process a predicate phrase.
    ///
    /// The phrase is tokenized and annotated by the injected lemmatizer. If
    /// the first token's lemma is "be" or "have" it is dropped and recorded.
    /// When `lemmatize` is true and the leading auxiliary is not a form of
    /// "be", the remaining tokens are replaced by their lemmas ("has won
    /// prize" becomes "win prize"); otherwise the surface forms are kept
    /// ("was president of" keeps "president of" as written).
    pub fn process(&self, predicate: &str, lemmatize: bool) -> ProcessedPredicate {
        let tokens = self.lemmatizer.lemmatize(predicate);

        let leading_aux = match tokens.first().map(|t| t.lemma.as_str()) {
            Some("be") => LeadingAux::Be,
            Some("have") => LeadingAux::Have,
            _ => LeadingAux::None,
        };

        let use_lemmas = lemmatize && leading_aux != LeadingAux::Be;

        let words: Vec<&str> = tokens
            .iter()
            .skip(usize::from(leading_aux != LeadingAux::None))
            .map(|t| {
                if use_lemmas {
                    t.lemma.as_str()
                } else {
                    t.surface.as_str()
                }
            })
            .collect();

        ProcessedPredicate {
            text: words.join(" "),
            leading_aux,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{PartOfSpeech, TokenAnnotation};

    /// Lookup-table lemmatizer; test stand-in for the real one.
    struct TableLemmatizer;

    impl Lemmatizer for TableLemmatizer {
        fn lemmatize(&self, text: &str) -> Vec<TokenAnnotation> {
            text.to_lowercase()
                .split_whitespace()
                .map(|w| {
                    let (lemma, pos) = match w {
                        "was" | "is" | "were" => ("be", PartOfSpeech::Aux),
                        "has" | "had" => ("have", PartOfSpeech::Aux),
                        "won" => ("win", PartOfSpeech::Verb),
                        "graduated" => ("graduate", PartOfSpeech::Verb),
                        "affiliated" => ("affiliate", PartOfSpeech::Verb),
                        "of" | "from" | "to" => (w, PartOfSpeech::Adposition),
                        _ => (w, PartOfSpeech::Noun),
                    };
                    TokenAnnotation {
                        surface: w.to_string(),
                        lemma: lemma.to_string(),
                        pos,
                    }
                })
                .collect()
        }
    }

    #[test]
    fn strips_leading_be_and_keeps_surface() {
        let processor = PredicateProcessor::new(&TableLemmatizer);
        let p = processor.process("was president of", true);
        assert_eq!(p.text, "president of");
        assert_eq!(p.leading_aux, LeadingAux::Be);
    }

    #[test]
    fn strips_leading_have_and_lemmatizes_rest() {
        let processor = PredicateProcessor::new(&TableLemmatizer);
        let p = processor.process("has won prize", true);
        assert_eq!(p.text, "win prize");
        assert_eq!(p.leading_aux, LeadingAux::Have);
    }

    #[test]
    fn plain_verb_phrase_lemmatized() {
        let processor = PredicateProcessor::new(&TableLemmatizer);
        let p = processor.process("graduated from", true);
        assert_eq!(p.text, "graduate from");
        assert_eq!(p.leading_aux, LeadingAux::None);
    }

    #[test]
    fn lemmatize_off_keeps_surface_forms() {
        let processor = PredicateProcessor::new(&TableLemmatizer);
        let p = processor.process("has won prize", false);
        assert_eq!(p.text, "won prize");
        assert_eq!(p.leading_aux, LeadingAux::Have);
    }

    #[test]
    fn is_affiliated_to_becomes_affiliated_to() {
        // Leading "be" suppresses lemmatization of the rest, matching how
        // copular predicates read in questions.
        let processor = PredicateProcessor::new(&TableLemmatizer);
        let p = processor.process("is affiliated to", true);
        assert_eq!(p.text, "affiliated to");
        assert!(p.leading_aux.uses_was());
    }
}
