//! chronobench-nlp — a deterministic rule-based English lemmatizer.
//!
//! Stands in for a full NLP pipeline where chronobench only needs two
//! things: the lemma of each token in short predicate phrases (so "was
//! president of" can shed its auxiliary and "has won prize" can become "win
//! prize"), and a coarse part-of-speech tag. A lexicon of irregular forms is
//! tried first, then conventional suffix rules. No model files, no global
//! state; construct one and inject it wherever a
//! [`chronobench_core::traits::Lemmatizer`] is expected.

mod lexicon;

use unicode_segmentation::UnicodeSegmentation;

use chronobench_core::traits::{Lemmatizer, PartOfSpeech, TokenAnnotation};

use crate::lexicon::{ADPOSITIONS, AUXILIARIES, CONJUNCTIONS, DETERMINERS, IRREGULAR, PRONOUNS};

/// Rule-based lemmatizer over lowercased unicode words.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, text: &str) -> Vec<TokenAnnotation> {
        text.to_lowercase()
            .unicode_words()
            .map(|word| {
                let (lemma, verbish) = analyze(word);
                let pos = tag(word, &lemma, verbish);
                TokenAnnotation {
                    surface: word.to_string(),
                    lemma,
                    pos,
                }
            })
            .collect()
    }
}

/// Lemma of one lowercased word, plus whether a verbal inflection was
/// removed (feeds the part-of-speech guess).
fn analyze(word: &str) -> (String, bool) {
    if let Some(lemma) = IRREGULAR.get(word) {
        return (lemma.to_string(), true);
    }

    // Noun/verb plural and 3rd-person endings
    if let Some(stem) = word.strip_suffix("ies").filter(|s| s.len() > 1) {
        return (format!("{stem}y"), false);
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return (format!("{stem}ss"), false);
    }
    if word.len() > 3 && word.ends_with("es") {
        let stem = &word[..word.len() - 2];
        if stem.ends_with("ch")
            || stem.ends_with("sh")
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with('s')
            || stem.ends_with('o')
        {
            return (stem.to_string(), false);
        }
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return (word[..word.len() - 1].to_string(), false);
    }

    // Past tense
    if let Some(stem) = word.strip_suffix("ied").filter(|s| s.len() > 1) {
        return (format!("{stem}y"), true);
    }
    if word.len() > 4 && word.ends_with("ated") {
        return (format!("{}ate", &word[..word.len() - 4]), true);
    }
    if word.len() > 4 && word.ends_with("eed") {
        return (word[..word.len() - 1].to_string(), true);
    }
    if word.len() > 3 && word.ends_with("ed") {
        return (restore_stem(&word[..word.len() - 2]), true);
    }

    // Progressive
    if word.len() > 4 && word.ends_with("ing") {
        return (restore_stem(&word[..word.len() - 3]), true);
    }

    (word.to_string(), false)
}

/// Undo the spelling changes inflection applied to a stripped stem:
/// "plann" -> "plan", "rul" -> "rule", "direct" -> "direct".
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    // Doubled final consonant from CVC doubling; genuine ll/ss/ff/zz endings
    // stay ("call", "miss").
    if n >= 3 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) {
        let last = chars[n - 1];
        if !matches!(last, 'l' | 's' | 'f' | 'z') {
            return chars[..n - 1].iter().collect();
        }
    }

    // Short consonant-vowel-consonant stems had a silent e ("rule", "make").
    // Final w/x/y never drop an e, so they are excluded.
    if n >= 3
        && !is_vowel(chars[n - 1])
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
        && is_vowel(chars[n - 2])
        && !is_vowel(chars[n - 3])
    {
        return format!("{stem}e");
    }

    stem.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn tag(word: &str, lemma: &str, verbish: bool) -> PartOfSpeech {
    if AUXILIARIES.contains(word) || matches!(lemma, "be" | "have" | "do") {
        PartOfSpeech::Aux
    } else if ADPOSITIONS.contains(word) {
        PartOfSpeech::Adposition
    } else if DETERMINERS.contains(word) {
        PartOfSpeech::Determiner
    } else if PRONOUNS.contains(word) {
        PartOfSpeech::Pronoun
    } else if CONJUNCTIONS.contains(word) {
        PartOfSpeech::Conjunction
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        PartOfSpeech::Number
    } else if verbish {
        PartOfSpeech::Verb
    } else {
        PartOfSpeech::Noun
    }
}
