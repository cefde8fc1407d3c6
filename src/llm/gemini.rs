// src/llm/gemini.rs
// Google Gemini generateContent client (single-turn, text only)
// System and user prompts are joined into one text part; the key travels in the query string

use crate::http::create_shared_client;
use crate::llm::http_client::LlmHttpClient;
use crate::llm::provider::{LlmClient, Provider, ProviderError, ProviderFailure};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{Span, instrument};
use uuid::Uuid;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: LlmHttpClient,
}

impl GeminiClient {
    /// Create a new Gemini client with default model
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, Provider::Gemini.default_model().to_string())
    }

    /// Create a new Gemini client with custom model
    pub fn with_model(api_key: String, model: String) -> Self {
        Self::with_http_client(api_key, model, create_shared_client())
    }

    /// Create a new Gemini client with a shared HTTP client
    pub fn with_http_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            http: LlmHttpClient::from_client(client),
        }
    }

    /// Point the client at a different API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.http = self.http.with_retries(retries);
        self
    }

    fn build_request(system: &str, user: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: format!("{}\n\n{}", system, user),
                }],
            }],
        }
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
fn extract_text(body: &str) -> Result<String, ProviderFailure> {
    let data: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| ProviderFailure::MalformedResponse(format!("invalid JSON: {}", e)))?;

    data.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            ProviderFailure::MalformedResponse("missing candidates[0].content.parts[0].text".into())
        })
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn provider_type(&self) -> Provider {
        Provider::Gemini
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip(self, system, user), fields(request_id, model = %self.model))]
    async fn call(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        Span::current().record("request_id", &request_id);

        let body = serde_json::to_string(&Self::build_request(system, user))
            .map_err(|e| ProviderError::new(Provider::Gemini, ProviderFailure::Transport(e.to_string())))?;
        crate::llm::logging::log_request(&request_id, Provider::Gemini, &self.model, body.len());

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let response_body = self
            .http
            .execute(&request_id, body, |client, body| {
                client
                    .post(&url)
                    .query(&[("key", self.api_key.as_str())])
                    .header("Content-Type", "application/json")
                    .body(body)
            })
            .await
            .map_err(|cause| ProviderError::new(Provider::Gemini, cause))?;

        let text = extract_text(&response_body)
            .map_err(|cause| ProviderError::new(Provider::Gemini, cause))?;

        crate::llm::logging::log_completion(
            &request_id,
            Provider::Gemini,
            start_time.elapsed().as_millis() as u64,
            text.len(),
        );
        Ok(text)
    }
}
