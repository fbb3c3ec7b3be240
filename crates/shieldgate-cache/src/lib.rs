//! # shieldgate-cache
//!
//! Cache provider implementations for Shieldgate.
//!
//! Ships an in-process provider built on
//! [moka](https://crates.io/crates/moka) with per-entry TTL. The
//! [`CacheProvider`](shieldgate_core::traits::CacheProvider) trait keeps
//! the seam open for external backends.
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
