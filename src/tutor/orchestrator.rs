// src/tutor/orchestrator.rs
// Sequential provider fallback with sticky promotion and a one-way mock latch

use crate::error::{Result, TutorError};
use crate::llm::{Provider, ProviderError, ProviderFailure, ProviderRegistry};
use crate::tutor::prompts::PromptSpec;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Every failure from one exhausted attempt sequence, in attempt order
#[derive(Debug)]
pub struct ExhaustionReport {
    pub failures: Vec<ProviderError>,
}

impl ExhaustionReport {
    pub fn providers(&self) -> Vec<Provider> {
        self.failures.iter().map(|f| f.provider).collect()
    }
}

/// Hook for surfacing backend trouble to operators.
///
/// Callers of the tutoring operations never see these failures; they only
/// see `used_mock_mode`.
pub trait FallbackObserver: Send + Sync {
    fn on_attempt_failed(&self, _error: &ProviderError) {}

    fn on_exhausted(&self, _report: &ExhaustionReport) {}
}

/// Default observer: logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl FallbackObserver for TracingObserver {
    fn on_attempt_failed(&self, error: &ProviderError) {
        warn!(
            provider = %error.provider,
            rate_limited = error.cause.is_rate_limited(),
            error = %error.cause,
            "Provider attempt failed"
        );
    }

    fn on_exhausted(&self, report: &ExhaustionReport) {
        let providers: Vec<_> = report.providers().iter().map(|p| p.to_string()).collect();
        warn!(
            providers = ?providers,
            "All providers failed, mock mode latched for this session"
        );
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A provider answered; `text` is its raw output
    Live { provider: Provider, text: String },
    /// Caller must synthesize mock content. `newly_latched` is true when this
    /// dispatch exhausted the chain and flipped the latch.
    Mock { newly_latched: bool },
}

#[derive(Debug)]
struct FallbackState {
    sticky: Option<Provider>,
    latched: bool,
}

/// Tries providers one at a time until one answers.
///
/// Holds the sticky provider and the mock latch for its whole lifetime. Both
/// live behind one mutex that is never held across an await, so overlapping
/// dispatches see last-write-wins updates.
pub struct FallbackOrchestrator {
    registry: ProviderRegistry,
    state: Mutex<FallbackState>,
    attempt_timeout: Duration,
    force_mock: bool,
    observer: Arc<dyn FallbackObserver>,
}

impl FallbackOrchestrator {
    pub fn new(registry: ProviderRegistry, attempt_timeout: Duration, force_mock: bool) -> Self {
        let latched = force_mock || !registry.has_any();
        if latched {
            info!(
                force_mock,
                providers = registry.available_providers().len(),
                "Starting in mock mode"
            );
        }
        Self {
            state: Mutex::new(FallbackState {
                sticky: registry.primary(),
                latched,
            }),
            registry,
            attempt_timeout,
            force_mock,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn FallbackObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    pub fn is_latched(&self) -> bool {
        self.lock().latched
    }

    pub fn sticky(&self) -> Option<Provider> {
        self.lock().sticky
    }

    /// Sticky provider first, then the rest of the registry in priority order
    pub fn candidate_order(&self) -> Vec<Provider> {
        let sticky = self.sticky();
        let mut order: Vec<Provider> = sticky
            .filter(|p| self.registry.is_available(*p))
            .into_iter()
            .collect();
        order.extend(
            self.registry
                .available_providers()
                .into_iter()
                .filter(|p| Some(*p) != sticky),
        );
        order
    }

    /// Clear the latch and reset the sticky provider to the registry primary.
    ///
    /// The latch stays on when mock mode is forced or no provider exists.
    pub fn unlatch(&self) {
        let mut state = self.lock();
        state.latched = self.force_mock || !self.registry.has_any();
        state.sticky = self.registry.primary();
        info!(latched = state.latched, "Fallback state reset");
    }

    /// Run one prompt through the candidate chain.
    ///
    /// Returns `Cancelled` without touching sticky or latch state if `cancel`
    /// fires first.
    pub async fn dispatch(&self, prompt: &PromptSpec, cancel: &CancellationToken) -> Result<Dispatch> {
        if cancel.is_cancelled() {
            return Err(TutorError::Cancelled);
        }
        if self.is_latched() || !self.registry.has_any() {
            debug!("Mock mode active, skipping providers");
            return Ok(Dispatch::Mock {
                newly_latched: false,
            });
        }

        let mut failures = Vec::new();
        for provider in self.candidate_order() {
            let Some(client) = self.registry.client(provider) else {
                continue;
            };

            let start = Instant::now();
            let attempt = tokio::time::timeout(
                self.attempt_timeout,
                client.call(&prompt.system, &prompt.user),
            );
            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    info!(provider = %provider, "Attempt cancelled");
                    return Err(TutorError::Cancelled);
                }
                outcome = attempt => outcome,
            };

            let error = match outcome {
                Ok(Ok(text)) => {
                    info!(
                        provider = %provider,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Provider succeeded"
                    );
                    self.lock().sticky = Some(provider);
                    return Ok(Dispatch::Live { provider, text });
                }
                Ok(Err(e)) => e,
                Err(_) => ProviderError::new(provider, ProviderFailure::Timeout(self.attempt_timeout)),
            };
            self.observer.on_attempt_failed(&error);
            failures.push(error);
        }

        self.lock().latched = true;
        self.observer.on_exhausted(&ExhaustionReport { failures });
        Ok(Dispatch::Mock {
            newly_latched: true,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FallbackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FallbackOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("FallbackOrchestrator")
            .field("registry", &self.registry)
            .field("sticky", &state.sticky)
            .field("latched", &state.latched)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}
