//! Static word tables backing the rule lemmatizer.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Irregular forms -> lemma. Covers the auxiliaries the question generators
/// key on, plus verbs common in knowledge-graph predicates whose past forms
/// the suffix rules would mangle.
pub static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // to be
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        // to have
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        // to do
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        // frequent predicate verbs
        ("won", "win"),
        ("held", "hold"),
        ("led", "lead"),
        ("ran", "run"),
        ("wrote", "write"),
        ("written", "write"),
        ("became", "become"),
        ("went", "go"),
        ("took", "take"),
        ("taken", "take"),
        ("made", "make"),
        ("gave", "give"),
        ("given", "give"),
        ("got", "get"),
        ("stood", "stand"),
        ("sat", "sit"),
        ("fought", "fight"),
        ("taught", "teach"),
        ("left", "leave"),
        ("met", "meet"),
        ("rose", "rise"),
        ("fell", "fall"),
        ("born", "bear"),
        ("bore", "bear"),
        ("died", "die"),
        ("dies", "die"),
        ("founded", "found"),
        ("served", "serve"),
        ("moved", "move"),
        ("lived", "live"),
        ("coached", "coach"),
        ("owned", "own"),
        ("sang", "sing"),
        ("sung", "sing"),
        ("built", "build"),
        ("lost", "lose"),
        ("chaired", "chair"),
        ("married", "marry"),
    ])
});

/// Forms counted as auxiliaries for part-of-speech purposes.
pub static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
        "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    ])
});

pub static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "of", "in", "on", "at", "by", "for", "from", "to", "with", "as", "until", "till", "since",
        "during", "over", "under", "between", "against", "about", "through", "into", "within",
    ])
});

pub static DETERMINERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["the", "a", "an", "this", "that", "these", "those"]));

pub static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "he", "she", "it", "they", "we", "you", "i", "him", "her", "them", "his", "its", "their",
        "who", "which", "whom",
    ])
});

pub static CONJUNCTIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["and", "or", "but", "nor"]));
