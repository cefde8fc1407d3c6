// src/llm/logging.rs
// Shared LLM logging helpers to reduce duplication across provider clients

use crate::llm::provider::Provider;
use tracing::{debug, info};

/// Log the start of a provider call.
pub fn log_request(request_id: &str, provider: Provider, model: &str, prompt_len: usize) {
    debug!(
        request_id = %request_id,
        provider = %provider,
        model = %model,
        prompt_len = prompt_len,
        "Sending provider request"
    );
}

/// Log completion summary for a provider call.
pub fn log_completion(request_id: &str, provider: Provider, duration_ms: u64, content_len: usize) {
    info!(
        request_id = %request_id,
        provider = %provider,
        duration_ms = duration_ms,
        content_len = content_len,
        "{} call complete", provider
    );
}
