//! Token payload parsing.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use shieldgate_core::error::AppError;
use shieldgate_core::result::AppResult;

use crate::claims::SessionClaims;

/// Parses claims out of a compact JWS token without verifying it.
#[derive(Debug, Clone)]
pub struct TokenParser {
    /// Name of the payload claim carrying the session identifier.
    session_claim: String,
}

impl TokenParser {
    /// Creates a parser that reads the session identifier from the given claim.
    pub fn new(session_claim: impl Into<String>) -> Self {
        Self {
            session_claim: session_claim.into(),
        }
    }

    /// Parses the token's payload and extracts the claims Shieldgate uses.
    ///
    /// Accepts any structurally well-formed `header.payload.signature`
    /// token. The signature segment is never inspected. A payload without
    /// the session claim parses successfully with `session_id: None`.
    pub fn parse(&self, token: &str) -> AppResult<SessionClaims> {
        let mut segments = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(AppError::authentication(
                "Token is not a three-segment compact JWS",
            ));
        };

        let decoded = URL_SAFE_NO_PAD.decode(payload).map_err(|e| {
            AppError::authentication(format!("Token payload is not valid base64url: {e}"))
        })?;

        let claims: Value = serde_json::from_slice(&decoded).map_err(|e| {
            AppError::authentication(format!("Token payload is not valid JSON: {e}"))
        })?;

        let Value::Object(map) = claims else {
            return Err(AppError::authentication(
                "Token payload is not a JSON object",
            ));
        };

        Ok(SessionClaims {
            session_id: map
                .get(&self.session_claim)
                .and_then(Value::as_str)
                .map(String::from),
            subject: map.get("sub").and_then(Value::as_str).map(String::from),
            expires_at: map.get("exp").and_then(Value::as_i64),
        })
    }
}
