//! Request principal established by the upstream authentication stage.

/// Identity attached to the request by the authentication layer that runs
/// before the gate (signature verification, expiry checks).
///
/// The gate never performs primary authentication; it only adds a
/// revocation check on top of requests that arrive already
/// authenticated. Requests without a principal, or with an
/// unauthenticated one, pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct AuthPrincipal {
    /// Whether the upstream stage accepted the request's credential.
    pub authenticated: bool,
    /// The authenticated subject, when known.
    pub subject: Option<String>,
}

impl AuthPrincipal {
    /// An authenticated principal for the given subject.
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            subject: Some(subject.into()),
        }
    }

    /// An anonymous principal.
    pub fn anonymous() -> Self {
        Self::default()
    }
}
