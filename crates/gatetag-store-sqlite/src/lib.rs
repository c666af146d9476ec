//! SQLite backend for the gatetag registration and log stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! connection thread without blocking the async runtime. That single thread
//! also serializes statements from concurrent callers, which is what makes
//! the conditional update in [`SqliteStore`] atomic per key.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
