//! TOML fact-set parser.
//!
//! Loads fact sets from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Fact, FactSet, YearValue};
use crate::time::parse_year;

/// Intermediate TOML structure for parsing fact-set files.
#[derive(Debug, Deserialize)]
struct TomlFactFile {
    dataset: TomlDatasetHeader,
    #[serde(default)]
    facts: Vec<TomlFact>,
}

#[derive(Debug, Deserialize)]
struct TomlDatasetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlFact {
    subject: String,
    predicate: String,
    object: String,
    time_from: YearValue,
    #[serde(default)]
    time_until: Option<YearValue>,
}

/// Parse a single TOML file into a `FactSet`.
pub fn parse_fact_set(path: &Path) -> Result<FactSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fact set file: {}", path.display()))?;

    parse_fact_set_str(&content, path)
}

/// Parse a TOML string into a `FactSet` (useful for testing).
pub fn parse_fact_set_str(content: &str, source_path: &Path) -> Result<FactSet> {
    let parsed: TomlFactFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let facts = parsed
        .facts
        .into_iter()
        .map(|f| Fact {
            subject: f.subject,
            predicate: f.predicate,
            object: f.object,
            time_from: f.time_from,
            time_until: f.time_until,
        })
        .collect();

    Ok(FactSet {
        id: parsed.dataset.id,
        name: parsed.dataset.name,
        description: parsed.dataset.description,
        facts,
    })
}

/// Recursively load all `.toml` fact-set files from a directory.
pub fn load_fact_directory(dir: &Path) -> Result<Vec<FactSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_fact_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_fact_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from fact-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Index of the fact (if applicable).
    pub fact_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a fact set for common issues.
pub fn validate_fact_set(set: &FactSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Unparsable years are hard data errors downstream; flag them up front
    for (i, fact) in set.facts.iter().enumerate() {
        if let Err(e) = parse_year(&fact.time_from) {
            warnings.push(ValidationWarning {
                fact_index: Some(i),
                message: format!("time_from: {e}"),
            });
        }
        if let Some(until) = &fact.time_until {
            if let Err(e) = parse_year(until) {
                warnings.push(ValidationWarning {
                    fact_index: Some(i),
                    message: format!("time_until: {e}"),
                });
            }
        }
    }

    // Check for blank subject/predicate/object
    for (i, fact) in set.facts.iter().enumerate() {
        for (field, value) in [
            ("subject", &fact.subject),
            ("predicate", &fact.predicate),
            ("object", &fact.object),
        ] {
            if value.trim().is_empty() {
                warnings.push(ValidationWarning {
                    fact_index: Some(i),
                    message: format!("{field} is empty"),
                });
            }
        }
    }

    // Check for exact duplicate facts
    for (i, fact) in set.facts.iter().enumerate() {
        if set.facts[..i].contains(fact) {
            warnings.push(ValidationWarning {
                fact_index: Some(i),
                message: format!(
                    "duplicate fact: {} / {} / {}",
                    fact.subject, fact.predicate, fact.object
                ),
            });
        }
    }

    // Reversed intervals are normalized silently at generation time; worth a note
    for (i, fact) in set.facts.iter().enumerate() {
        if let (Ok(from), Some(Ok(until))) = (
            parse_year(&fact.time_from),
            fact.time_until.as_ref().map(parse_year),
        ) {
            if from > until {
                warnings.push(ValidationWarning {
                    fact_index: Some(i),
                    message: format!("time_from {from} is after time_until {until}"),
                });
            }
        }
    }

    warnings
}
