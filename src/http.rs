// src/http.rs
// Shared HTTP client for all provider adapters

use std::time::Duration;

/// Transport-level request timeout. The orchestrator applies its own, usually
/// shorter, per-attempt deadline on top of this.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Create the shared HTTP client with appropriate defaults.
///
/// This client should be created once at startup and handed to every
/// provider adapter so they share one connection pool.
pub fn create_shared_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
