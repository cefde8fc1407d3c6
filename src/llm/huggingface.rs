// src/llm/huggingface.rs
// Hugging Face hosted inference client (text2text generation)

use crate::http::create_shared_client;
use crate::llm::http_client::LlmHttpClient;
use crate::llm::provider::{LlmClient, Provider, ProviderError, ProviderFailure};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{Span, instrument};
use uuid::Uuid;

const HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co/models";

const MAX_LENGTH: u32 = 2048;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.95;

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct Generated {
    generated_text: Option<String>,
}

/// The endpoint answers either a list of generations or a single object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Generated>),
    Single(Generated),
}

/// Hugging Face inference API client
pub struct HuggingFaceClient {
    api_key: String,
    model: String,
    base_url: String,
    http: LlmHttpClient,
}

impl HuggingFaceClient {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, Provider::HuggingFace.default_model().to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self::with_http_client(api_key, model, create_shared_client())
    }

    pub fn with_http_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            base_url: HUGGINGFACE_API_BASE.to_string(),
            http: LlmHttpClient::from_client(client),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.http = self.http.with_retries(retries);
        self
    }

    fn build_request(system: &str, user: &str) -> InferenceRequest {
        InferenceRequest {
            inputs: format!("{}\n\nQuestion: {}\n\nAnswer:", system, user),
            parameters: InferenceParameters {
                max_length: MAX_LENGTH,
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        }
    }
}

/// Accept `[0].generated_text` first, then a bare `generated_text`
fn extract_text(body: &str) -> Result<String, ProviderFailure> {
    let data: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| ProviderFailure::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let text = match data {
        InferenceResponse::Batch(items) => items.into_iter().next().and_then(|g| g.generated_text),
        InferenceResponse::Single(g) => g.generated_text,
    };

    text.filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ProviderFailure::MalformedResponse("missing generated_text".into()))
}

#[async_trait]
impl LlmClient for HuggingFaceClient {
    fn provider_type(&self) -> Provider {
        Provider::HuggingFace
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip(self, system, user), fields(request_id, model = %self.model))]
    async fn call(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        Span::current().record("request_id", &request_id);

        let body = serde_json::to_string(&Self::build_request(system, user)).map_err(|e| {
            ProviderError::new(Provider::HuggingFace, ProviderFailure::Transport(e.to_string()))
        })?;
        crate::llm::logging::log_request(&request_id, Provider::HuggingFace, &self.model, body.len());

        let url = format!("{}/{}", self.base_url, self.model);
        let response_body = self
            .http
            .post_bearer(&request_id, &url, &self.api_key, body)
            .await
            .map_err(|cause| ProviderError::new(Provider::HuggingFace, cause))?;

        let text = extract_text(&response_body)
            .map_err(|cause| ProviderError::new(Provider::HuggingFace, cause))?;

        crate::llm::logging::log_completion(
            &request_id,
            Provider::HuggingFace,
            start_time.elapsed().as_millis() as u64,
            text.len(),
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = HuggingFaceClient::build_request("Be brief.", "What is DNA?");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "Be brief.\n\nQuestion: What is DNA?\n\nAnswer:");
        assert_eq!(json["parameters"]["max_length"], 2048);
        assert!((json["parameters"]["top_p"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_extract_from_batch() {
        let body = r#"[{"generated_text":"Deoxyribonucleic acid."}]"#;
        assert_eq!(extract_text(body).unwrap(), "Deoxyribonucleic acid.");
    }

    #[test]
    fn test_extract_from_single_object() {
        let body = r#"{"generated_text":"A molecule."}"#;
        assert_eq!(extract_text(body).unwrap(), "A molecule.");
    }

    #[test]
    fn test_extract_model_loading_error_is_malformed() {
        let body = r#"{"error":"Model is currently loading","estimated_time":20.0}"#;
        assert!(matches!(
            extract_text(body),
            Err(ProviderFailure::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_empty_batch_is_malformed() {
        assert!(extract_text("[]").is_err());
    }
}
