// src/config/file.rs
// File-based configuration from ~/.tutor/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TutorConfig {
    #[serde(default)]
    pub tutor: TutorSection,
    #[serde(default)]
    pub providers: ProvidersSection,
}

/// Orchestrator behaviour
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TutorSection {
    /// Start every session latched into mock mode
    pub force_mock: Option<bool>,
    /// Deadline for a single provider attempt
    pub attempt_timeout_secs: Option<u64>,
    /// Maximum number of conversation turns kept in memory
    pub history_limit: Option<usize>,
    /// Transport retries inside one attempt (429/5xx/connect)
    pub transport_retries: Option<u32>,
}

/// Per-provider model and endpoint overrides
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ProvidersSection {
    pub gemini_model: Option<String>,
    pub huggingface_model: Option<String>,
    pub cohere_model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub huggingface_base_url: Option<String>,
    pub cohere_base_url: Option<String>,
}

impl TutorConfig {
    /// Load config from ~/.tutor/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tutor")
            .join("config.toml")
    }
}
