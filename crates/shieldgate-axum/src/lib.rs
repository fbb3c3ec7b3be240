//! # shieldgate-axum
//!
//! The session gate: an axum middleware that confirms, on every
//! authenticated request, that the session referenced by the bearer
//! token has not been revoked.
//!
//! Validity answers come from the Shield identity service and are cached
//! with a short TTL (cache-aside), so a revoked session is rejected
//! within one TTL window of revocation. Infrastructure failures fail
//! open: the gate only ever rejects on an explicit "invalid" verdict.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use axum::{Router, middleware, routing::get};
//! # use shieldgate_core::config::gate::GateConfig;
//! # use shieldgate_core::traits::{CacheProvider, SessionValidator};
//! # use shieldgate_axum::{SessionGate, validate_session};
//! # fn build(cache: Arc<dyn CacheProvider>, shield: Arc<dyn SessionValidator>) -> Router {
//! let gate = Arc::new(SessionGate::new(GateConfig::default(), cache, shield));
//! Router::new()
//!     .route("/api/expenses", get(|| async { "ok" }))
//!     .layer(middleware::from_fn_with_state(gate, validate_session))
//! # }
//! ```

pub mod bypass;
pub mod gate;
pub mod principal;
pub mod response;

pub use gate::{GateOutcome, SessionGate, validate_session};
pub use principal::AuthPrincipal;
pub use response::{SESSION_REVOKED_MESSAGE, SessionRejection};
