// src/llm/mod.rs
// LLM inference clients (Gemini, Hugging Face, Cohere)

mod cohere;
mod gemini;
mod http_client;
mod huggingface;
mod logging;
mod provider;
mod registry;

pub use cohere::CohereClient;
pub use gemini::GeminiClient;
pub use http_client::LlmHttpClient;
pub use huggingface::HuggingFaceClient;
pub use provider::{LlmClient, Provider, ProviderError, ProviderFailure};
pub use registry::ProviderRegistry;
