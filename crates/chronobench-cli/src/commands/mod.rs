pub mod compare;
pub mod generate;
pub mod init;
pub mod list_models;
pub mod run;
pub mod validate;

use anyhow::Result;
use chronobench_core::model::QuestionKind;

/// Parse a comma-separated kinds list, defaulting to every implemented kind.
pub fn parse_kinds(kinds: Option<&str>) -> Result<Vec<QuestionKind>> {
    match kinds {
        None => Ok(QuestionKind::IMPLEMENTED.to_vec()),
        Some(list) => list
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<QuestionKind>()
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .collect(),
    }
}
