//! The session gate — cache-aside revocation checks per request.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info, warn};

use shieldgate_cache::keys;
use shieldgate_core::config::gate::GateConfig;
use shieldgate_core::result::AppResult;
use shieldgate_core::traits::cache::CacheProvider;
use shieldgate_core::traits::validator::SessionValidator;
use shieldgate_token::TokenParser;

use crate::bypass;
use crate::principal::AuthPrincipal;
use crate::response::SessionRejection;

/// Cached value for a confirmed-valid session. Only positive results are
/// cached; the entry's presence is the validity flag.
const VALID_MARKER: &str = "valid";

/// Decision produced by [`SessionGate::authorize`] for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Let the request continue down the pipeline.
    Pass,
    /// Short-circuit with 401 — the session has been revoked.
    Reject,
}

/// Guards authenticated routes by confirming, with bounded staleness,
/// that the session referenced by the inbound token is still active.
///
/// One instance is built at startup and shared across all in-flight
/// requests; the cache and validator handle their own synchronisation.
#[derive(Debug)]
pub struct SessionGate {
    /// Gate configuration snapshot.
    config: GateConfig,
    /// Claim parser for the configured session claim.
    parser: TokenParser,
    /// Shared validity cache.
    cache: Arc<dyn CacheProvider>,
    /// Remote session-liveness check (Shield in production).
    validator: Arc<dyn SessionValidator>,
    /// TTL for cached validity entries.
    ttl: Duration,
}

impl SessionGate {
    /// Creates a gate from configuration and its collaborators.
    pub fn new(
        config: GateConfig,
        cache: Arc<dyn CacheProvider>,
        validator: Arc<dyn SessionValidator>,
    ) -> Self {
        let parser = TokenParser::new(config.session_claim.clone());
        let ttl = Duration::from_secs(config.validity_ttl_seconds);

        Self {
            config,
            parser,
            cache,
            validator,
            ttl,
        }
    }

    /// Authorizes one request.
    ///
    /// Passes through public routes, CORS preflights, requests without an
    /// authenticated principal, and requests whose credential is missing,
    /// malformed, or carries no session claim; primary authentication
    /// and its rejections belong to the upstream stage. Rejects only on
    /// an explicit "session invalid" verdict; every infrastructure
    /// failure along the way is logged and fails open.
    pub async fn authorize(
        &self,
        method: &Method,
        path: &str,
        principal: Option<&AuthPrincipal>,
        auth_header: Option<&str>,
    ) -> GateOutcome {
        if bypass::is_public(method, path, &self.config.public_routes) {
            return GateOutcome::Pass;
        }

        if !principal.is_some_and(|p| p.authenticated) {
            return GateOutcome::Pass;
        }

        let Some(token) = auth_header.and_then(|h| h.strip_prefix(self.config.bearer_scheme.as_str()))
        else {
            return GateOutcome::Pass;
        };

        match self.check_session(token).await {
            Ok(true) => GateOutcome::Pass,
            Ok(false) => {
                info!(path, "Rejecting request for revoked session");
                GateOutcome::Reject
            }
            Err(e) => {
                warn!(error = %e, path, "Session validation failed; allowing request through");
                GateOutcome::Pass
            }
        }
    }

    /// Resolves the token's session validity, cache first.
    ///
    /// `Ok(true)` also covers tokens that carry no session claim: those
    /// are "not using session tracking", not errors. `Ok(false)` is never
    /// cached, so a later re-login under a fresh session identifier gets
    /// a fresh check and no negative-entry eviction path is needed.
    async fn check_session(&self, token: &str) -> AppResult<bool> {
        let claims = self.parser.parse(token)?;
        let Some(session_id) = claims.session_id() else {
            debug!("Token carries no session claim; skipping session check");
            return Ok(true);
        };

        let key = keys::session_validity(session_id);
        if self.cache.get(&key).await?.is_some() {
            debug!(session_id, "Session validity cache hit");
            return Ok(true);
        }

        let valid = self.validator.is_session_valid(session_id).await?;
        if valid {
            self.cache.set(&key, VALID_MARKER, self.ttl).await?;
        }
        Ok(valid)
    }
}

/// Axum middleware wrapping [`SessionGate::authorize`].
///
/// Mount with `middleware::from_fn_with_state(gate, validate_session)`.
/// The upstream authentication layer is expected to insert an
/// [`AuthPrincipal`] extension; requests without one pass through.
pub async fn validate_session(
    State(gate): State<Arc<SessionGate>>,
    request: Request,
    next: Next,
) -> Response {
    let principal = request.extensions().get::<AuthPrincipal>().cloned();
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let outcome = gate
        .authorize(
            request.method(),
            request.uri().path(),
            principal.as_ref(),
            auth_header.as_deref(),
        )
        .await;

    match outcome {
        GateOutcome::Pass => next.run(request).await,
        GateOutcome::Reject => SessionRejection::revoked().into_response(),
    }
}
