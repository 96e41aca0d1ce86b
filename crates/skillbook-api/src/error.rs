//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use skillbook_core::Error as CoreError;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// Answered with a bare 400; the reason only goes to the log.
  #[error("invalid request: {0}")]
  InvalidRequest(String),

  /// Answered with a 500 carrying `message`; `source` only goes to the log.
  #[error("{message}: {source}")]
  Internal {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Map a core error, using `message` as the 500 body if it is a storage
  /// failure. Used as `.map_err(ApiError::context("Error deleting ..."))`.
  pub fn context(message: &'static str) -> impl FnOnce(CoreError) -> ApiError {
    move |e| match e {
      CoreError::Storage(source) => ApiError::Internal { message, source },
      other => other.into(),
    }
  }
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    match e {
      CoreError::NotFound { .. } => ApiError::NotFound(e.to_string()),
      CoreError::InvalidRequest(reason) => ApiError::InvalidRequest(reason),
      CoreError::Storage(source) => ApiError::Internal {
        message: "An error occurred",
        source,
      },
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self { ApiError::InvalidRequest(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(e: QueryRejection) -> Self { ApiError::InvalidRequest(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response(),
      ApiError::InvalidRequest(reason) => {
        tracing::debug!(%reason, "rejected request");
        StatusCode::BAD_REQUEST.into_response()
      }
      ApiError::Internal { message, source } => {
        tracing::error!(error = %source, "{message}");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
      }
    }
  }
}
