//! Hugging Face Inference API provider.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use chronobench_core::traits::{AskRequest, AskResponse, InferenceProvider, ModelInfo};

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Hugging Face Inference API provider.
pub struct HuggingFaceProvider {
    api_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    pub fn new(api_token: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_token: api_token.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }
}

#[derive(Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct HfGeneration {
    generated_text: String,
}

#[derive(Deserialize)]
struct HfError {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

#[async_trait]
impl InferenceProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn ask(&self, request: &AskRequest) -> anyhow::Result<AskResponse> {
        let start = Instant::now();

        let body = HfRequest {
            inputs: &request.prompt,
        };

        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, request.model))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(ProviderError::ModelNotFound(request.model.clone()).into());
        }
        if status == 503 {
            // The inference backend spins models up on demand and reports an
            // estimate while doing so.
            let body = response.text().await.unwrap_or_default();
            let estimated_secs = serde_json::from_str::<HfError>(&body)
                .ok()
                .and_then(|e| e.estimated_time)
                .map(|t| t.ceil() as u64)
                .unwrap_or(20);
            return Err(ProviderError::ModelLoading {
                model: request.model.clone(),
                estimated_secs,
            }
            .into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<HfError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ProviderError::ApiError { status, message }.into());
        }

        let generations: Vec<HfGeneration> =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let raw_answer = generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .unwrap_or_default();

        Ok(AskResponse {
            raw_answer,
            model: request.model.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: "bigscience/T0pp".into(),
                name: "T0pp".into(),
                provider: "huggingface".into(),
            },
            ModelInfo {
                id: "google/t5-11b-ssm-tqa".into(),
                name: "T5 11B SSM TQA".into(),
                provider: "huggingface".into(),
            },
        ]
    }
}
