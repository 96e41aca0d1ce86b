//! Handlers for `/learningProgress` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/learningProgress` | Body: [`LearningProgress`]; returns 200 + stored entry |
//! | `GET`    | `/learningProgress` | Every entry, unordered |
//! | `GET`    | `/learningProgress/:id` | 404 if not found |
//! | `PUT`    | `/learningProgress/:id` | Full replace; 404 if not found |
//! | `DELETE` | `/learningProgress/:id` | 200 even if nothing was deleted |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
};
use skillbook_core::{
  progress::{self, LearningProgress},
  repository::Repository,
};

use crate::error::ApiError;

const STORAGE_ERROR: &str = "Error accessing learning progress";

/// `POST /learningProgress`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<LearningProgress>, JsonRejection>,
) -> Result<Json<LearningProgress>, ApiError>
where
  S: Repository<LearningProgress>,
{
  let Json(entry) = body?;
  let stored = progress::create(&*store, entry)
    .await
    .map_err(ApiError::context(STORAGE_ERROR))?;
  Ok(Json(stored))
}

/// `GET /learningProgress`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<LearningProgress>>, ApiError>
where
  S: Repository<LearningProgress>,
{
  let entries = progress::list_all(&*store)
    .await
    .map_err(ApiError::context(STORAGE_ERROR))?;
  Ok(Json(entries))
}

/// `GET /learningProgress/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<LearningProgress>, ApiError>
where
  S: Repository<LearningProgress>,
{
  let entry = progress::get(&*store, &id)
    .await
    .map_err(ApiError::context(STORAGE_ERROR))?;
  Ok(Json(entry))
}

/// `PUT /learningProgress/:id` — every field is replaced; the body's `id`
/// is ignored.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  body: Result<Json<LearningProgress>, JsonRejection>,
) -> Result<Json<LearningProgress>, ApiError>
where
  S: Repository<LearningProgress>,
{
  let Json(entry) = body?;
  let updated = progress::update(&*store, &id, entry)
    .await
    .map_err(ApiError::context(STORAGE_ERROR))?;
  Ok(Json(updated))
}

/// `DELETE /learningProgress/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: Repository<LearningProgress>,
{
  progress::delete(&*store, &id)
    .await
    .map_err(ApiError::context(STORAGE_ERROR))?;
  Ok(StatusCode::OK)
}
