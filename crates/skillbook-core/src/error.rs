//! Error types for `skillbook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("invalid request: {0}")]
  InvalidRequest(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
    Self::NotFound { entity, id: id.into() }
  }

  pub fn invalid(reason: impl Into<String>) -> Self {
    Self::InvalidRequest(reason.into())
  }

  /// Wrap a backend error. Used as `.map_err(Error::storage)`.
  pub fn storage<E>(source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
