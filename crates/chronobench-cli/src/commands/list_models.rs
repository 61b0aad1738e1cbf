//! The `chronobench list-models` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use chronobench_providers::config::load_config_from;
use chronobench_providers::create_provider;

pub fn execute(provider_filter: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["Provider", "Model ID", "Name"]);

    let mut rows = 0usize;
    for (name, provider_config) in &config.providers {
        if let Some(filter) = &provider_filter {
            if name != filter {
                continue;
            }
        }
        let provider = create_provider(name, provider_config)?;
        for model in provider.available_models() {
            table.add_row(vec![name.clone(), model.id, model.name]);
            rows += 1;
        }
    }

    if rows == 0 {
        println!("No providers configured. Run `chronobench init` to create a starter config.");
    } else {
        println!("{table}");
    }

    Ok(())
}
