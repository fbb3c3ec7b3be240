//! Session gate configuration.

use serde::{Deserialize, Serialize};

/// Session gate configuration.
///
/// Read once at startup; the gate holds an owned snapshot for its whole
/// lifetime rather than re-reading per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Authorization header scheme prefix, including the trailing space.
    #[serde(default = "default_bearer_scheme")]
    pub bearer_scheme: String,
    /// Name of the token claim carrying the session identifier.
    #[serde(default = "default_session_claim")]
    pub session_claim: String,
    /// TTL for cached session-validity entries in seconds.
    ///
    /// Kept short so a revoked session is rejected within one TTL window
    /// of revocation rather than for the token's remaining lifetime.
    #[serde(default = "default_validity_ttl")]
    pub validity_ttl_seconds: u64,
    /// Route prefixes the gate never checks (login, registration,
    /// password-reset family, API docs, health).
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bearer_scheme: default_bearer_scheme(),
            session_claim: default_session_claim(),
            validity_ttl_seconds: default_validity_ttl(),
            public_routes: default_public_routes(),
        }
    }
}

fn default_bearer_scheme() -> String {
    "Bearer ".to_string()
}

fn default_session_claim() -> String {
    "session_id".to_string()
}

fn default_validity_ttl() -> u64 {
    60
}

fn default_public_routes() -> Vec<String> {
    [
        "/api/auth/login",
        "/api/auth/register",
        "/api/auth/forgot-password",
        "/api/auth/reset-password",
        "/api/auth/confirm-email",
        "/api/auth/resend-confirmation",
        "/docs",
        "/api/health",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
