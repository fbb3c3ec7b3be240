//! Public-route bypass rules.

use axum::http::Method;

/// Returns `true` if the request never goes through session validation.
///
/// CORS preflights and the configured public routes (login, registration,
/// password-reset family, docs, health) are exempt. Route matching is
/// exact-prefix and case-insensitive on the path.
pub fn is_public(method: &Method, path: &str, public_routes: &[String]) -> bool {
    if method == Method::OPTIONS {
        return true;
    }

    let path = path.to_ascii_lowercase();
    public_routes
        .iter()
        .any(|route| path.starts_with(&route.to_ascii_lowercase()))
}
