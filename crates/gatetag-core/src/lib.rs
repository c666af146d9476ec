//! Core types and trait definitions for the gatetag RFID service.
//!
//! This crate is deliberately free of HTTP, MQTT, and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod clock;
pub mod error;
pub mod log;
pub mod publish;
pub mod reconcile;
pub mod registration;
pub mod store;

pub use error::{Error, Result};
