//! # shieldgate-token
//!
//! Claim parsing for bearer tokens, **without** signature verification.
//!
//! Shieldgate runs behind an authentication stage that has already
//! verified the token's signature and expiry. This crate only needs to
//! read the session-identifier claim out of the payload, so it decodes
//! the JWS payload segment directly instead of re-validating the token.

pub mod claims;
pub mod parser;

pub use claims::SessionClaims;
pub use parser::TokenParser;
