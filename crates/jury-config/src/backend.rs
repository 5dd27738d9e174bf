//! Managed backend connection configuration.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL of the managed backend (e.g., `https://abcd.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key. Row-level security on the backend does the rest.
    #[serde(default)]
    pub anon_key: String,

    /// Per-request timeout applied by the backend client.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Check if the backend config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}
