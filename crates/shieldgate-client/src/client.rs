//! HTTP session validation against the Shield service.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use shieldgate_core::config::shield::ShieldConfig;
use shieldgate_core::error::{AppError, ErrorKind};
use shieldgate_core::result::AppResult;
use shieldgate_core::traits::validator::SessionValidator;

/// Response body of Shield's session-validation endpoint.
#[derive(Debug, Deserialize)]
struct ValidateResponse {
    /// Whether the session is still active.
    valid: bool,
}

/// HTTP client for Shield's `GET /api/v1/sessions/{id}/validate` endpoint.
///
/// The underlying `reqwest::Client` carries the configured timeout, so a
/// hung Shield instance surfaces as an error within the bound instead of
/// stalling the request being gated.
#[derive(Debug, Clone)]
pub struct ShieldClient {
    /// HTTP client for making requests.
    http: reqwest::Client,
    /// Shield base URL without a trailing slash.
    base_url: String,
}

impl ShieldClient {
    /// Creates a new client from Shield configuration.
    pub fn new(config: &ShieldConfig) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build Shield HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SessionValidator for ShieldClient {
    async fn is_session_valid(&self, session_id: &str) -> AppResult<bool> {
        let url = format!("{}/api/v1/sessions/{session_id}/validate", self.base_url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Shield request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Shield returned {status} for session validation"
            )));
        }

        let body: ValidateResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Shield returned an unreadable validation body: {e}"),
                e,
            )
        })?;

        debug!(session_id, valid = body.valid, "Shield session validation");
        Ok(body.valid)
    }
}
