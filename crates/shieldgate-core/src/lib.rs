//! # shieldgate-core
//!
//! Core crate for Shieldgate. Contains traits, configuration schemas,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Shieldgate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
