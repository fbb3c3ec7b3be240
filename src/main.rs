//! Shieldgate reference server.
//!
//! Minimal host wiring the session gate the way a consuming service
//! would: configuration, logging, cache, Shield client, and an axum
//! router with the gate mounted in front of protected routes.

use std::sync::Arc;

use axum::middleware as axum_middleware;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use shieldgate_axum::{AuthPrincipal, SessionGate, validate_session};
use shieldgate_cache::provider::CacheManager;
use shieldgate_client::ShieldClient;
use shieldgate_core::config::AppConfig;
use shieldgate_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SHIELDGATE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Shieldgate v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Initialize cache ─────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = Arc::new(CacheManager::new(&config.cache)?);

    // ── Step 2: Initialize Shield client ─────────────────────────
    tracing::info!("Connecting gate to Shield at {}", config.shield.base_url);
    let shield = Arc::new(ShieldClient::new(&config.shield)?);

    // ── Step 3: Build the session gate ───────────────────────────
    let gate = Arc::new(SessionGate::new(config.gate.clone(), cache, shield));

    // ── Step 4: Router ───────────────────────────────────────────
    let app = build_router(gate);

    // ── Step 5: Serve with graceful shutdown ─────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Shieldgate server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Shieldgate server shut down gracefully");
    Ok(())
}

/// Build the demo router with the gate mounted.
///
/// Layer ordering matters: the authentication stand-in runs before the
/// gate so the principal extension is present when the gate executes.
fn build_router(gate: Arc<SessionGate>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/profile", get(profile))
        .layer(axum_middleware::from_fn_with_state(gate, validate_session))
        .layer(axum_middleware::from_fn(stub_authentication))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Stand-in for the primary authentication stage.
///
/// A real deployment verifies the token signature here and attaches the
/// resulting principal; the gate only consumes the extension.
async fn stub_authentication(
    mut request: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let principal = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .map(|_| AuthPrincipal::authenticated("demo-user"))
        .unwrap_or_else(AuthPrincipal::anonymous);
    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// Liveness probe (public route).
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Sample protected route.
async fn profile(request: axum::extract::Request) -> Json<serde_json::Value> {
    let subject = request
        .extensions()
        .get::<AuthPrincipal>()
        .and_then(|p| p.subject.clone());
    Json(serde_json::json!({"subject": subject}))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
