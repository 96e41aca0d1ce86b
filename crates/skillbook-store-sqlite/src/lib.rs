//! SQLite document-store backend for Skillbook.
//!
//! Every entity is kept as a JSON document in one `documents` table keyed by
//! `(collection, id)`. Wraps [`tokio_rusqlite`] so all database access runs on
//! a dedicated thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
