//! Mock provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use chronobench_core::traits::{AskRequest, AskResponse, InferenceProvider, ModelInfo};

/// A mock inference provider for exercising the eval engine without real
/// API calls.
///
/// Returns configurable answers based on question substring matching.
pub struct MockProvider {
    /// Map of question substring -> answer text.
    answers: HashMap<String, String>,
    /// Default answer if no question matches.
    default_answer: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<AskRequest>>,
}

impl MockProvider {
    /// Create a mock with the given question->answer mappings.
    pub fn new(answers: HashMap<String, String>) -> Self {
        Self {
            answers,
            default_answer: "yes".to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same answer.
    pub fn with_fixed_answer(answer: &str) -> Self {
        Self {
            answers: HashMap::new(),
            default_answer: answer.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<AskRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn ask(&self, request: &AskRequest) -> anyhow::Result<AskResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let raw_answer = self
            .answers
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_answer.clone());

        Ok(AskResponse {
            raw_answer,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_answer() {
        let provider = MockProvider::with_fixed_answer("2009");
        let request = AskRequest {
            model: "mock-model".into(),
            prompt: "In which year was Obama president of USA?".into(),
        };

        let response = provider.ask(&request).await.unwrap();
        assert_eq!(response.raw_answer, "2009");
        assert_eq!(provider.call_count(), 1);
        assert!(provider.last_request().unwrap().prompt.contains("Obama"));
    }

    #[tokio::test]
    async fn question_matching() {
        let mut answers = HashMap::new();
        answers.insert("2009".to_string(), "yes".to_string());
        answers.insert("until which year".to_string(), "2017".to_string());

        let provider = MockProvider::new(answers);

        let yes_no = AskRequest {
            model: "mock-model".into(),
            prompt: "Was Obama president of USA in the year 2009?".into(),
        };
        assert_eq!(provider.ask(&yes_no).await.unwrap().raw_answer, "yes");

        let until = AskRequest {
            model: "mock-model".into(),
            prompt: "From the year 2008 until which year was Obama president of USA?".into(),
        };
        // "until which year" matches before the default kicks in
        assert_eq!(provider.ask(&until).await.unwrap().raw_answer, "2017");
        assert_eq!(provider.call_count(), 2);
    }
}
