//! API configuration resolved once at process start.
use std::time::Duration;

use tracing::warn;

/// Default public Agify endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.agify.io";
/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 8000;
/// Fixed minimum wall-clock spacing between consecutive dispatches.
pub const MIN_REQUEST_INTERVAL_MS: u64 = 1000;

const ENV_BASE_URL: &str = "AGIFY_BASE_URL";
const ENV_TIMEOUT: &str = "AGIFY_TIMEOUT";
const ENV_API_KEY: &str = "AGIFY_API_KEY";

/// Immutable API settings shared by the dispatcher and schema accessor.
///
/// Resolved once from the environment via [`ApiConfig::load`]; never mutated
/// afterwards. `min_request_interval` is pinned by `load` and only varies
/// when tests construct a config directly.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub min_request_interval: Duration,
    pub api_key: Option<String>,
}

impl ApiConfig {
    /// Resolves configuration from `AGIFY_BASE_URL`, `AGIFY_TIMEOUT`, and
    /// `AGIFY_API_KEY`, falling back to the fixed defaults. Cannot fail: a
    /// malformed timeout override is coerced to the default with a warning.
    #[must_use]
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Pure core of [`ApiConfig::load`], taking the environment as a lookup
    /// function so unit tests never touch process state.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let timeout_ms = lookup(ENV_TIMEOUT).map_or(DEFAULT_TIMEOUT_MS, |raw| {
            match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => value,
                Ok(_) | Err(_) => {
                    warn!(
                        "Ignoring invalid {} override '{}'; using {}ms",
                        ENV_TIMEOUT, raw, DEFAULT_TIMEOUT_MS
                    );
                    DEFAULT_TIMEOUT_MS
                }
            }
        });

        let api_key = lookup(ENV_API_KEY).filter(|value| !value.is_empty());

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            min_request_interval: Duration::from_millis(MIN_REQUEST_INTERVAL_MS),
            api_key,
        }
    }
}
