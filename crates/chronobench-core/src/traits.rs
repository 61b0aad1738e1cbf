//! Collaborator interfaces: lemmatization and remote inference.
//!
//! The core consumes both as black boxes. Lemmatizers are constructed by the
//! caller and injected (no ambient global model state), and inference
//! providers own all network concerns; the core treats any response as an
//! opaque raw string and performs no retries of its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lemmatizer
// ---------------------------------------------------------------------------

/// Coarse part-of-speech tags, enough to distinguish auxiliaries and content
/// words in predicate phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Verb,
    Aux,
    Noun,
    Adjective,
    Adposition,
    Determiner,
    Pronoun,
    Conjunction,
    Number,
    Other,
}

/// One token of a lemmatized phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    /// The token as written (lowercased).
    pub surface: String,
    /// Dictionary form of the token.
    pub lemma: String,
    /// Coarse part of speech.
    pub pos: PartOfSpeech,
}

/// Tokenizes a phrase and annotates each token with its lemma and part of
/// speech.
///
/// Implementations must be deterministic for a given input; the core calls
/// this on every predicate it processes and caches nothing.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, text: &str) -> Vec<TokenAnnotation>;
}

// ---------------------------------------------------------------------------
// Inference provider
// ---------------------------------------------------------------------------

/// A question sent to a remote model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Model identifier (e.g. "bigscience/T0pp").
    pub model: String,
    /// The question text, sent verbatim as the prompt.
    pub prompt: String,
}

/// A raw model answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The answer exactly as the provider returned it.
    pub raw_answer: String,
    /// Model that actually answered.
    pub model: String,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
}

/// Trait for remote question-answering backends.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Human-readable provider name (e.g. "huggingface").
    fn name(&self) -> &str;

    /// Ask a single question and return the raw answer text.
    async fn ask(&self, request: &AskRequest) -> anyhow::Result<AskResponse>;

    /// List models this provider can query.
    fn available_models(&self) -> Vec<ModelInfo>;
}
