//! Session validator trait — the seam to the Shield identity service.

use async_trait::async_trait;

use crate::result::AppResult;

/// Answers whether a login session is still active.
///
/// The production implementation calls the Shield service over HTTP;
/// tests inject in-process stubs. Implementations must not retry
/// internally; the gate attempts a single check per cache miss and
/// fails open on errors.
#[async_trait]
pub trait SessionValidator: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `true` if the session has not been logged out or revoked.
    ///
    /// Errors signal that the answer is unknown (network failure,
    /// timeout, malformed reply), never that the session is invalid.
    async fn is_session_valid(&self, session_id: &str) -> AppResult<bool>;
}
