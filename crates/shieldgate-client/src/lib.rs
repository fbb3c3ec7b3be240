//! # shieldgate-client
//!
//! Client for the Shield identity service. Implements the
//! [`SessionValidator`](shieldgate_core::traits::SessionValidator) seam
//! over HTTP: one bounded request per check, no internal retries.

pub mod client;

pub use client::ShieldClient;
