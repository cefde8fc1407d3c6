// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::llm::Provider;
use tracing::{debug, info, warn};

/// Secondary name accepted for the Gemini key
const GEMINI_FALLBACK_ENV_VAR: &str = "GOOGLE_API_KEY";

/// API keys loaded from environment variables
///
/// A present, non-empty key is what makes a provider available.
#[derive(Clone, Default)]
pub struct ApiKeys {
    /// Gemini/Google API key (GEMINI_API_KEY or GOOGLE_API_KEY)
    pub gemini: Option<String>,
    /// Hugging Face inference token (HUGGINGFACE_API_KEY)
    pub huggingface: Option<String>,
    /// Cohere API key (COHERE_API_KEY)
    pub cohere: Option<String>,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("gemini", &self.gemini.is_some())
            .field("huggingface", &self.huggingface.is_some())
            .field("cohere", &self.cohere.is_some())
            .finish()
    }
}

impl ApiKeys {
    /// Load API keys through `lookup` (usually `std::env::var`), treating
    /// blank values as absent
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read_key = |name: &str| lookup(name).filter(|k| !k.trim().is_empty());
        let keys = Self {
            gemini: read_key(Provider::Gemini.api_key_env_var())
                .or_else(|| read_key(GEMINI_FALLBACK_ENV_VAR)),
            huggingface: read_key(Provider::HuggingFace.api_key_env_var()),
            cohere: read_key(Provider::Cohere.api_key_env_var()),
        };
        keys.log_status();
        keys
    }

    /// Log which API keys are available (without exposing values)
    fn log_status(&self) {
        if self.has_llm_provider() {
            debug!(keys = %self.summary(), "API keys loaded");
        } else {
            warn!("No API keys configured - tutoring will run in mock mode");
        }
    }

    /// Check if any LLM provider is available
    pub fn has_llm_provider(&self) -> bool {
        self.gemini.is_some() || self.huggingface.is_some() || self.cohere.is_some()
    }

    /// Get a summary of available providers
    pub fn summary(&self) -> String {
        let mut providers = Vec::new();
        if self.gemini.is_some() {
            providers.push("Gemini");
        }
        if self.huggingface.is_some() {
            providers.push("HuggingFace");
        }
        if self.cohere.is_some() {
            providers.push("Cohere");
        }
        if providers.is_empty() {
            "None".to_string()
        } else {
            providers.join(", ")
        }
    }
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// API keys for LLM providers
    pub api_keys: ApiKeys,
    /// Force mock mode regardless of keys (TUTOR_USE_MOCK_AI)
    pub force_mock: Option<bool>,
    /// Per-attempt deadline in seconds (TUTOR_ATTEMPT_TIMEOUT_SECS)
    pub attempt_timeout_secs: Option<u64>,
    /// Conversation ring-buffer capacity (TUTOR_HISTORY_LIMIT)
    pub history_limit: Option<usize>,
    /// Raw values that failed to parse, kept for validation
    pub(crate) invalid: Vec<(&'static str, String)>,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|raw| !raw.trim().is_empty());

        let mut invalid = Vec::new();
        let force_mock = match lookup("TUTOR_USE_MOCK_AI") {
            Some(raw) => {
                let parsed = parse_bool(&raw);
                if parsed.is_none() {
                    invalid.push(("TUTOR_USE_MOCK_AI", raw));
                }
                parsed
            }
            None => None,
        };
        let attempt_timeout_secs =
            read_number(lookup("TUTOR_ATTEMPT_TIMEOUT_SECS"), "TUTOR_ATTEMPT_TIMEOUT_SECS", &mut invalid);
        let history_limit =
            read_number(lookup("TUTOR_HISTORY_LIMIT"), "TUTOR_HISTORY_LIMIT", &mut invalid);

        Self {
            api_keys: ApiKeys::from_lookup(&lookup),
            force_mock,
            attempt_timeout_secs,
            history_limit,
            invalid,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if !self.api_keys.has_llm_provider() {
            validation.add_warning(
                "No LLM API keys configured. Set GEMINI_API_KEY, HUGGINGFACE_API_KEY or COHERE_API_KEY.",
            );
        }

        if self.force_mock == Some(true) {
            validation.add_warning("TUTOR_USE_MOCK_AI is set - live providers will not be called");
        }

        if self.attempt_timeout_secs == Some(0) {
            validation.add_error("TUTOR_ATTEMPT_TIMEOUT_SECS must be greater than zero");
        }

        for (name, raw) in &self.invalid {
            validation.add_warning(format!("Ignoring unparseable {}='{}'", name, raw));
        }

        validation
    }
}

fn read_number<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    invalid: &mut Vec<(&'static str, String)>,
) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, value = %raw, "Ignoring unparseable environment value");
            invalid.push((name, raw));
            None
        }
    }
}

/// Parse the usual boolean spellings used in env files
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
