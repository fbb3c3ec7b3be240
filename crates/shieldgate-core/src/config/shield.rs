//! Shield identity service configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the Shield session-validation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldConfig {
    /// Base URL of the Shield service, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds. A hung Shield instance must not
    /// stall request handling beyond this bound.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5200".to_string()
}

fn default_timeout() -> u64 {
    5
}
