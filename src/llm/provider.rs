// src/llm/provider.rs
// LLM provider abstraction layer

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString};
use thiserror::Error;

/// LLM provider types, declared in fallback priority order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    Gemini,
    HuggingFace,
    Cohere,
}

impl Provider {
    /// Fixed priority chain used whenever no sticky override applies
    pub const PRIORITY: [Provider; 3] = [Self::Gemini, Self::HuggingFace, Self::Cohere];

    /// Get the environment variable name for this provider's API key
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::HuggingFace => "HUGGINGFACE_API_KEY",
            Self::Cohere => "COHERE_API_KEY",
        }
    }

    /// Default model for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-pro",
            Self::HuggingFace => "google/flan-t5-base",
            Self::Cohere => "command-r-plus-08-2024",
        }
    }
}

/// Why a single provider attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("no response within {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl ProviderFailure {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Status { status: 429, .. })
    }
}

/// A failure scoped to exactly one provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} failed: {cause}")]
pub struct ProviderError {
    pub provider: Provider,
    pub cause: ProviderFailure,
}

impl ProviderError {
    pub fn new(provider: Provider, cause: ProviderFailure) -> Self {
        Self { provider, cause }
    }
}

/// Uniform adapter contract every backend implements.
///
/// One call is one attempt against one wire contract. Implementations must
/// return failures instead of swallowing them; the orchestrator decides
/// whether to move on to the next candidate.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the system instruction and user content, returning raw text
    async fn call(&self, system: &str, user: &str) -> Result<String, ProviderError>;

    /// Get the provider type
    fn provider_type(&self) -> Provider;

    /// Get the model name this client targets
    fn model_name(&self) -> String {
        self.provider_type().default_model().to_string()
    }
}
