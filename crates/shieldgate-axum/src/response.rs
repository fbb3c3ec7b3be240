//! Rejection response emitted when a session has been revoked.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Message returned to callers whose session is no longer valid.
pub const SESSION_REVOKED_MESSAGE: &str = "Session expired or revoked. Please log in again.";

/// Machine-readable 401 body instructing the caller to re-authenticate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRejection {
    /// What happened and what the caller should do about it.
    pub error: String,
}

impl SessionRejection {
    /// The rejection for a revoked or expired session.
    pub fn revoked() -> Self {
        Self {
            error: SESSION_REVOKED_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}
