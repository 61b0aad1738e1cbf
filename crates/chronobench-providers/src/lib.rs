//! chronobench-providers — inference API integrations.
//!
//! Implements the `InferenceProvider` trait for the Hugging Face Inference
//! API, plus a mock provider for exercising the engine in tests.

pub mod config;
pub mod error;
pub mod huggingface;
pub mod mock;

pub use config::{create_provider, load_config, ChronobenchConfig, ProviderConfig};
pub use error::ProviderError;
