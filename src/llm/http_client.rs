// src/llm/http_client.rs
// Shared HTTP execution for all provider adapters

use crate::llm::provider::ProviderFailure;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Default base backoff duration between retries (doubles each attempt)
const DEFAULT_BASE_BACKOFF_MS: u64 = 500;

/// Longest error body kept in a failure message
const MAX_ERROR_BODY: usize = 512;

/// Shared HTTP executor for all provider adapters.
///
/// `max_retries` defaults to zero: one attempt is one request, so a rate
/// limit or outage moves the orchestrator on to the next provider instead
/// of stalling here.
#[derive(Debug, Clone)]
pub struct LlmHttpClient {
    client: Client,
    pub max_retries: u32,
    pub base_backoff: Duration,
}

impl LlmHttpClient {
    /// Create from an existing reqwest::Client
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            max_retries: 0,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
        }
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// POST a JSON body with Bearer auth, returning the response body text
    pub async fn post_bearer(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String, ProviderFailure> {
        self.execute(request_id, body, |client, body| {
            client
                .post(url)
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .body(body)
        })
        .await
    }

    /// Execute a request built by `build_request`, retrying transient failures.
    ///
    /// The closure is called on each try with the reqwest Client and the
    /// request body, so callers control URL, headers, and auth.
    pub async fn execute<F>(
        &self,
        request_id: &str,
        body: String,
        build_request: F,
    ) -> Result<String, ProviderFailure>
    where
        F: Fn(&Client, String) -> reqwest::RequestBuilder,
    {
        let mut retries = 0;
        let mut backoff = self.base_backoff;

        loop {
            match build_request(&self.client, body.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .text()
                            .await
                            .map_err(|e| ProviderFailure::Transport(e.without_url().to_string()));
                    }

                    let error_body = response.text().await.unwrap_or_default();
                    if retries < self.max_retries
                        && (status.as_u16() == 429 || status.is_server_error())
                    {
                        warn!(
                            request_id = %request_id,
                            status = %status,
                            "Transient error, retrying in {:?}...",
                            backoff
                        );
                        tokio::time::sleep(backoff).await;
                        retries += 1;
                        backoff *= 2;
                        continue;
                    }

                    return Err(ProviderFailure::Status {
                        status: status.as_u16(),
                        body: truncate(&error_body, MAX_ERROR_BODY),
                    });
                }
                Err(e) => {
                    // Request URLs may carry credentials in the query string
                    let e = e.without_url();
                    // Only connect/timeout errors are safe to repeat
                    if retries < self.max_retries && (e.is_connect() || e.is_timeout()) {
                        warn!(
                            request_id = %request_id,
                            error = %e,
                            "Request failed (connect/timeout), retrying in {:?}...",
                            backoff
                        );
                        tokio::time::sleep(backoff).await;
                        retries += 1;
                        backoff *= 2;
                        continue;
                    }
                    return Err(ProviderFailure::Transport(e.to_string()));
                }
            }
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
