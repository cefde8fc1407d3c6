// src/llm/registry.rs
// Provider registry: which backends have credentials, in what priority, and their clients

use crate::config::Settings;
use crate::http::create_shared_client;
use crate::llm::cohere::CohereClient;
use crate::llm::gemini::GeminiClient;
use crate::llm::huggingface::HuggingFaceClient;
use crate::llm::provider::{LlmClient, Provider};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Dispatch table from `Provider` to its client.
///
/// A provider is available exactly when a client was registered for it,
/// which in production means its credential was present. Ordering always
/// follows `Provider::PRIORITY`, never registration order.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    clients: HashMap<Provider, Arc<dyn LlmClient>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("available", &self.available_providers())
            .finish()
    }
}

impl ProviderRegistry {
    /// A registry with no usable providers (always mock mode)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build clients for every provider whose API key is configured
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.api_keys;
        let overrides = &settings.providers;
        let http = create_shared_client();
        let mut clients: Vec<Arc<dyn LlmClient>> = Vec::new();

        if let Some(ref key) = keys.gemini {
            let model = overrides
                .gemini_model
                .clone()
                .unwrap_or_else(|| Provider::Gemini.default_model().to_string());
            let mut client = GeminiClient::with_http_client(key.clone(), model, http.clone())
                .with_retries(settings.transport_retries);
            if let Some(ref url) = overrides.gemini_base_url {
                client = client.with_base_url(url.clone());
            }
            info!("Gemini client initialized");
            clients.push(Arc::new(client));
        }

        if let Some(ref key) = keys.huggingface {
            let model = overrides
                .huggingface_model
                .clone()
                .unwrap_or_else(|| Provider::HuggingFace.default_model().to_string());
            let mut client = HuggingFaceClient::with_http_client(key.clone(), model, http.clone())
                .with_retries(settings.transport_retries);
            if let Some(ref url) = overrides.huggingface_base_url {
                client = client.with_base_url(url.clone());
            }
            info!("HuggingFace client initialized");
            clients.push(Arc::new(client));
        }

        if let Some(ref key) = keys.cohere {
            let model = overrides
                .cohere_model
                .clone()
                .unwrap_or_else(|| Provider::Cohere.default_model().to_string());
            let mut client = CohereClient::with_http_client(key.clone(), model, http.clone())
                .with_retries(settings.transport_retries);
            if let Some(ref url) = overrides.cohere_base_url {
                client = client.with_base_url(url.clone());
            }
            info!("Cohere client initialized");
            clients.push(Arc::new(client));
        }

        let registry = Self::from_clients(clients);
        info!(providers = ?registry.available_providers(), "LLM providers available");
        registry
    }

    /// Register pre-built clients; a later client for the same provider wins
    pub fn from_clients(clients: impl IntoIterator<Item = Arc<dyn LlmClient>>) -> Self {
        let clients = clients
            .into_iter()
            .map(|client| (client.provider_type(), client))
            .collect();
        Self { clients }
    }

    /// Available providers in fixed declared priority
    pub fn available_providers(&self) -> Vec<Provider> {
        Provider::PRIORITY
            .into_iter()
            .filter(|p| self.clients.contains_key(p))
            .collect()
    }

    /// First available provider, if any
    pub fn primary(&self) -> Option<Provider> {
        self.available_providers().into_iter().next()
    }

    /// Check if any providers are available
    pub fn has_any(&self) -> bool {
        !self.clients.is_empty()
    }

    /// Check if a specific provider is available
    pub fn is_available(&self, provider: Provider) -> bool {
        self.clients.contains_key(&provider)
    }

    /// Get a specific provider client (if available)
    pub fn client(&self, provider: Provider) -> Option<Arc<dyn LlmClient>> {
        self.clients.get(&provider).cloned()
    }
}
