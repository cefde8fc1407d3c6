// src/llm/cohere.rs
// Cohere v2 chat client

use crate::http::create_shared_client;
use crate::llm::http_client::LlmHttpClient;
use crate::llm::provider::{LlmClient, Provider, ProviderError, ProviderFailure};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{Span, instrument};
use uuid::Uuid;

const COHERE_CHAT_URL: &str = "https://api.cohere.com/v2/chat";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
    /// v1-style flat answer
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Cohere chat API client
pub struct CohereClient {
    api_key: String,
    model: String,
    url: String,
    http: LlmHttpClient,
}

impl CohereClient {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, Provider::Cohere.default_model().to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self::with_http_client(api_key, model, create_shared_client())
    }

    pub fn with_http_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            url: COHERE_CHAT_URL.to_string(),
            http: LlmHttpClient::from_client(client),
        }
    }

    /// Replace the API root; the `/v2/chat` path is appended
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.url = format!("{}/v2/chat", base_url.into().trim_end_matches('/'));
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.http = self.http.with_retries(retries);
        self
    }

    fn build_request<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }
}

/// Accept `message.content[0].text` first, then a flat `text`
fn extract_text(body: &str) -> Result<String, ProviderFailure> {
    let data: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderFailure::MalformedResponse(format!("invalid JSON: {}", e)))?;

    data.message
        .and_then(|m| m.content.into_iter().next())
        .and_then(|block| block.text)
        .or(data.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ProviderFailure::MalformedResponse("missing message.content[0].text".into()))
}

#[async_trait]
impl LlmClient for CohereClient {
    fn provider_type(&self) -> Provider {
        Provider::Cohere
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip(self, system, user), fields(request_id, model = %self.model))]
    async fn call(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        Span::current().record("request_id", &request_id);

        let body = serde_json::to_string(&self.build_request(system, user))
            .map_err(|e| ProviderError::new(Provider::Cohere, ProviderFailure::Transport(e.to_string())))?;
        crate::llm::logging::log_request(&request_id, Provider::Cohere, &self.model, body.len());

        let response_body = self
            .http
            .post_bearer(&request_id, &self.url, &self.api_key, body)
            .await
            .map_err(|cause| ProviderError::new(Provider::Cohere, cause))?;

        let text = extract_text(&response_body)
            .map_err(|cause| ProviderError::new(Provider::Cohere, cause))?;

        crate::llm::logging::log_completion(
            &request_id,
            Provider::Cohere,
            start_time.elapsed().as_millis() as u64,
            text.len(),
        );
        Ok(text)
    }
}
