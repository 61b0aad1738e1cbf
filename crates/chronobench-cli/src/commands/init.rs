//! The `chronobench init` command.

use std::path::Path;

use anyhow::Result;

const STARTER_CONFIG: &str = r#"# chronobench configuration
default_provider = "huggingface"
default_model = "bigscience/T0pp"
parallelism = 4
output_dir = "./chronobench-results"

[providers.huggingface]
type = "huggingface"
api_token = "${CHRONOBENCH_HF_TOKEN}"

[providers.mock]
type = "mock"
fixed_answer = "yes"
"#;

const STARTER_FACTS: &str = r#"[dataset]
id = "example-presidents"
name = "Example Presidents"
description = "Starter fact set for chronobench"

[[facts]]
subject = "Obama"
predicate = "was president of"
object = "USA"
time_from = 2009
time_until = 2017

[[facts]]
subject = "Obama"
predicate = "was born in"
object = "Hawaii"
time_from = 1961
"#;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("chronobench.toml"), STARTER_CONFIG)?;
    write_if_absent(Path::new("facts/example.toml"), STARTER_FACTS)?;

    println!("Next steps:");
    println!("  1. export CHRONOBENCH_HF_TOKEN=hf_...");
    println!("  2. chronobench validate --facts facts/example.toml");
    println!("  3. chronobench run --facts facts/example.toml");
    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    println!("Created {}", path.display());
    Ok(())
}
