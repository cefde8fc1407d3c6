//! Test utilities for tutor integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tutor::config::Settings;
use tutor::llm::{LlmClient, Provider, ProviderError, ProviderFailure, ProviderRegistry};
use tutor::tutor::TutorService;

/// What a scripted client does on its next call
#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(String),
    Fail(ProviderFailure),
    Hang,
}

/// Fake backend that replays a fixed behavior and counts calls
pub struct ScriptedClient {
    provider: Provider,
    behavior: Mutex<Behavior>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedClient {
    pub fn replying(provider: Provider, text: impl Into<String>) -> Arc<Self> {
        Self::with(provider, Behavior::Reply(text.into()))
    }

    pub fn rate_limited(provider: Provider) -> Arc<Self> {
        Self::with(
            provider,
            Behavior::Fail(ProviderFailure::Status {
                status: 429,
                body: "quota exceeded".into(),
            }),
        )
    }

    pub fn hanging(provider: Provider) -> Arc<Self> {
        Self::with(provider, Behavior::Hang)
    }

    pub fn with(provider: Provider, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            provider,
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn set(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (system, user) pairs in call order
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn call(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Reply(text) => Ok(text),
            Behavior::Fail(cause) => Err(ProviderError::new(self.provider, cause)),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }

    fn provider_type(&self) -> Provider {
        self.provider
    }
}

pub fn registry(clients: &[Arc<ScriptedClient>]) -> ProviderRegistry {
    ProviderRegistry::from_clients(clients.iter().map(|c| c.clone() as Arc<dyn LlmClient>))
}

/// Service over scripted clients with a short attempt deadline
pub fn service(clients: &[Arc<ScriptedClient>]) -> TutorService {
    let settings = Settings {
        attempt_timeout: Duration::from_millis(200),
        ..Settings::default()
    };
    TutorService::new(registry(clients), &settings)
}

pub const VALID_QUIZ: &str = r#"Sure! Here is your quiz:
[
  {"question":"What is 2x if x = 3?","options":["A) 5","B) 6","C) 9","D) 23"],"correctAnswer":"B","explanation":"2 * 3 = 6","points":10},
  {"question":"Solve x + 1 = 4","options":["A) 3","B) 4","C) 5","D) 1"],"correctAnswer":"a","explanation":"4 - 1 = 3","points":10}
]
Good luck!"#;
