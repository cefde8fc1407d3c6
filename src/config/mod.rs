// src/config/mod.rs
// Configuration: environment, config file, and the resolved settings

pub mod env;
pub mod file;

pub use env::{ApiKeys, ConfigValidation, EnvConfig};
pub use file::{ProvidersSection, TutorConfig};

use std::time::Duration;

/// Default deadline for one provider attempt
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default conversation ring-buffer capacity, in turns
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Smallest history that still holds one user/assistant exchange
const MIN_HISTORY_LIMIT: usize = 2;

/// Resolved settings used to build a `TutorService`.
///
/// Precedence is environment, then config file, then built-in defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_keys: ApiKeys,
    pub force_mock: bool,
    pub attempt_timeout: Duration,
    pub history_limit: usize,
    pub transport_retries: u32,
    pub providers: ProvidersSection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            force_mock: false,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            transport_retries: 0,
            providers: ProvidersSection::default(),
        }
    }
}

impl Settings {
    /// Load env and file configuration and merge them
    pub fn load() -> Self {
        Self::resolve(&EnvConfig::load(), &TutorConfig::load())
    }

    /// Merge already-loaded configuration sources
    pub fn resolve(env: &EnvConfig, file: &TutorConfig) -> Self {
        let positive = |secs: &u64| *secs > 0;
        let attempt_timeout = env
            .attempt_timeout_secs
            .filter(positive)
            .or(file.tutor.attempt_timeout_secs.filter(positive))
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT);

        let history_limit = env
            .history_limit
            .or(file.tutor.history_limit)
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .max(MIN_HISTORY_LIMIT);

        Self {
            api_keys: env.api_keys.clone(),
            force_mock: env.force_mock.or(file.tutor.force_mock).unwrap_or(false),
            attempt_timeout,
            history_limit,
            transport_retries: file.tutor.transport_retries.unwrap_or(0),
            providers: file.providers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::TutorSection;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&EnvConfig::default(), &TutorConfig::default());
        assert!(!settings.force_mock);
        assert_eq!(settings.attempt_timeout, DEFAULT_ATTEMPT_TIMEOUT);
        assert_eq!(settings.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(settings.transport_retries, 0);
    }

    #[test]
    fn test_env_overrides_file() {
        let env = EnvConfig {
            force_mock: Some(false),
            attempt_timeout_secs: Some(5),
            ..EnvConfig::default()
        };
        let file = TutorConfig {
            tutor: TutorSection {
                force_mock: Some(true),
                attempt_timeout_secs: Some(60),
                history_limit: Some(10),
                transport_retries: Some(1),
            },
            ..TutorConfig::default()
        };

        let settings = Settings::resolve(&env, &file);
        assert!(!settings.force_mock);
        assert_eq!(settings.attempt_timeout, Duration::from_secs(5));
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.transport_retries, 1);
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let env = EnvConfig {
            attempt_timeout_secs: Some(0),
            ..EnvConfig::default()
        };
        let settings = Settings::resolve(&env, &TutorConfig::default());
        assert_eq!(settings.attempt_timeout, DEFAULT_ATTEMPT_TIMEOUT);
    }

    #[test]
    fn test_zero_env_timeout_defers_to_file() {
        let env = EnvConfig {
            attempt_timeout_secs: Some(0),
            ..EnvConfig::default()
        };
        let file = TutorConfig {
            tutor: TutorSection {
                attempt_timeout_secs: Some(45),
                ..TutorSection::default()
            },
            ..TutorConfig::default()
        };
        let settings = Settings::resolve(&env, &file);
        assert_eq!(settings.attempt_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_history_limit_has_floor() {
        let env = EnvConfig {
            history_limit: Some(0),
            ..EnvConfig::default()
        };
        let settings = Settings::resolve(&env, &TutorConfig::default());
        assert_eq!(settings.history_limit, MIN_HISTORY_LIMIT);
    }
}
