//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use shieldgate_axum::{AuthPrincipal, SessionGate, validate_session};
use shieldgate_cache::memory::MemoryCacheProvider;
use shieldgate_core::config::cache::MemoryCacheConfig;
use shieldgate_core::config::gate::GateConfig;
use shieldgate_core::error::AppError;
use shieldgate_core::result::AppResult;
use shieldgate_core::traits::validator::SessionValidator;

/// What the scripted validator answers for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Session is active.
    Valid,
    /// Session has been logged out or revoked.
    Revoked,
    /// Shield is unreachable (network error / timeout).
    Error,
}

/// In-process stand-in for the Shield client with scripted answers and a
/// call counter, so tests can assert cache-hit behavior.
#[derive(Debug, Default)]
pub struct ScriptedValidator {
    verdicts: Mutex<HashMap<String, Verdict>>,
    calls: AtomicUsize,
}

impl ScriptedValidator {
    /// Scripts the verdict for a session id. Unscripted sessions are valid.
    pub fn set(&self, session_id: &str, verdict: Verdict) {
        self.verdicts
            .lock()
            .unwrap()
            .insert(session_id.to_string(), verdict);
    }

    /// Number of validation calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionValidator for ScriptedValidator {
    async fn is_session_valid(&self, session_id: &str) -> AppResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let verdict = self
            .verdicts
            .lock()
            .unwrap()
            .get(session_id)
            .copied()
            .unwrap_or(Verdict::Valid);
        match verdict {
            Verdict::Valid => Ok(true),
            Verdict::Revoked => Ok(false),
            Verdict::Error => Err(AppError::external_service("Shield unreachable")),
        }
    }
}

/// Response captured from a test request.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Scripted Shield stand-in
    pub validator: Arc<ScriptedValidator>,
    /// The validity cache behind the gate
    pub cache: Arc<MemoryCacheProvider>,
}

impl TestApp {
    /// Create a test application with the default gate configuration.
    pub fn new() -> Self {
        Self::with_ttl(60)
    }

    /// Create a test application with a custom validity TTL.
    pub fn with_ttl(ttl_seconds: u64) -> Self {
        let validator = Arc::new(ScriptedValidator::default());
        let cache = Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig { max_capacity: 1000 },
            60,
        ));

        let config = GateConfig {
            validity_ttl_seconds: ttl_seconds,
            ..GateConfig::default()
        };
        let gate = Arc::new(SessionGate::new(
            config,
            cache.clone(),
            validator.clone(),
        ));

        let router = Router::new()
            .route("/api/auth/login", post(login_stub))
            .route("/api/health", get(health_stub))
            .route("/api/expenses", get(expenses_stub))
            .layer(axum_middleware::from_fn_with_state(gate, validate_session))
            .layer(axum_middleware::from_fn(stub_authentication));

        Self {
            router,
            validator,
            cache,
        }
    }

    /// Issue a request through the router.
    pub async fn request(&self, method: &str, path: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Stand-in for the primary authentication stage: any bearer credential
/// counts as authenticated. Signature verification is out of the gate's
/// scope, so tests do not need real signatures.
async fn stub_authentication(
    mut request: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let principal = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .map(|_| AuthPrincipal::authenticated("test-user"))
        .unwrap_or_else(AuthPrincipal::anonymous);
    request.extensions_mut().insert(principal);
    next.run(request).await
}

async fn login_stub() -> Json<Value> {
    Json(serde_json::json!({"access_token": "issued-elsewhere"}))
}

async fn health_stub() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn expenses_stub() -> Json<Value> {
    Json(serde_json::json!({"expenses": []}))
}

/// Build an unsigned three-segment token with the given payload.
pub fn make_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.testsignature")
}

/// Token whose payload carries the given session identifier.
pub fn session_token(session_id: &str) -> String {
    make_token(&serde_json::json!({
        "sub": "test-user",
        "session_id": session_id,
    }))
}
