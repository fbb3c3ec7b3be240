//! Typed claim set read from a bearer token payload.

/// Claims Shieldgate cares about, extracted from a token payload.
///
/// The session identifier is explicitly optional: tokens issued without
/// session tracking simply do not carry the claim, and the gate treats
/// that as "nothing to check" rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionClaims {
    /// The session identifier, if the configured claim is present.
    pub session_id: Option<String>,
    /// The subject claim (`sub`), if present.
    pub subject: Option<String>,
    /// The expiry claim (`exp`) as seconds since epoch, if present.
    pub expires_at: Option<i64>,
}

impl SessionClaims {
    /// Returns the session identifier, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}
