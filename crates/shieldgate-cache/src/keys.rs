//! Cache key builders for Shieldgate cache entries.
//!
//! Centralising key construction prevents typos and keeps Shieldgate's
//! entries from colliding with unrelated users of a shared cache store.

/// Prefix applied to all Shieldgate cache keys.
const PREFIX: &str = "shieldgate";

/// Cache key for the confirmed-validity flag of a session.
///
/// Only positive results are ever stored under this key; presence of an
/// unexpired entry means the session was valid as of the time of check.
pub fn session_validity(session_id: &str) -> String {
    format!("{PREFIX}:session:valid:{session_id}")
}
