//! Provider configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use chronobench_core::traits::InferenceProvider;

use crate::huggingface::HuggingFaceProvider;
use crate::mock::MockProvider;

/// Configuration for a single inference provider.
///
/// Note: Custom Debug impl masks API tokens to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    HuggingFace {
        api_token: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    Mock {
        #[serde(default = "default_mock_answer")]
        fixed_answer: String,
    },
}

fn default_mock_answer() -> String {
    "yes".to_string()
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::HuggingFace {
                api_token: _,
                base_url,
            } => f
                .debug_struct("HuggingFace")
                .field("api_token", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Mock { fixed_answer } => f
                .debug_struct("Mock")
                .field("fixed_answer", fixed_answer)
                .finish(),
        }
    }
}

/// Top-level chronobench configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronobenchConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Default provider to use.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Default model to use.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Max concurrent inference requests.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Distractor years on each side of the interval for yes/no questions.
    #[serde(default)]
    pub falsy_years: Option<u32>,
    /// Output directory for results.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_provider() -> String {
    "huggingface".to_string()
}
fn default_model() -> String {
    "bigscience/T0pp".to_string()
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./chronobench-results")
}

impl Default for ChronobenchConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            parallelism: default_parallelism(),
            falsy_years: None,
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::HuggingFace {
            api_token,
            base_url,
        } => ProviderConfig::HuggingFace {
            api_token: resolve_env_vars(api_token),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::Mock { fixed_answer } => ProviderConfig::Mock {
            fixed_answer: fixed_answer.clone(),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `chronobench.toml` in the current directory
/// 2. `~/.config/chronobench/config.toml`
///
/// Environment variable override: `CHRONOBENCH_HF_TOKEN`.
pub fn load_config() -> Result<ChronobenchConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ChronobenchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("chronobench.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ChronobenchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ChronobenchConfig::default(),
    };

    // Apply env var override
    if let Ok(token) = std::env::var("CHRONOBENCH_HF_TOKEN") {
        config
            .providers
            .entry("huggingface".into())
            .or_insert(ProviderConfig::HuggingFace {
                api_token: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::HuggingFace { api_token, .. }) =
            config.providers.get_mut("huggingface")
        {
            *api_token = token;
        }
    }

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("chronobench"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(name: &str, config: &ProviderConfig) -> Result<Box<dyn InferenceProvider>> {
    match config {
        ProviderConfig::HuggingFace {
            api_token,
            base_url,
        } => {
            let _ = name;
            Ok(Box::new(HuggingFaceProvider::new(
                api_token,
                base_url.clone(),
            )))
        }
        ProviderConfig::Mock { fixed_answer } => {
            Ok(Box::new(MockProvider::with_fixed_answer(fixed_answer)))
        }
    }
}
