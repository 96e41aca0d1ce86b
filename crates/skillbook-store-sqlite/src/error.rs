//! Error type for `skillbook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored document could not be decoded as its collection's entity type.
  #[error("corrupt document {id} in {collection}: {source}")]
  CorruptDocument {
    collection: &'static str,
    id:         String,
    #[source]
    source:     serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
