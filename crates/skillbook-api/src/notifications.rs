//! Handlers for `/api/v1/notifications` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/notifications/:userId` | `?page` (0-based), `?size`, `?sort=field,dir`; bare 400 on bad params |
//! | `GET`    | `/notifications/:userId/unread` | Unread only, unordered |
//! | `POST`   | `/notifications` | Body: `{"userId","message"}`; returns 201 + stored notification |
//! | `PUT`    | `/notifications/:id/markAsRead` | 404 if not found |
//! | `PUT`    | `/notifications/markAllAsRead/:userId` | |
//! | `DELETE` | `/notifications/:id` | 404 if not found |
//! | `DELETE` | `/notifications/user/:userId` | No existence check |
//!
//! The static `user` and `markAllAsRead` segments win over `:userId` and
//! `:id`. `GET /notifications/{user,markAllAsRead}/unread` and
//! `PUT /notifications/user/markAsRead` are still routed to the unread and
//! mark-as-read handlers. `PUT /notifications/markAllAsRead/markAsRead` stays
//! ambiguous and always means "mark all of user `markAsRead`'s notifications".

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use skillbook_core::{
  Error as CoreError,
  notification::{self, NewNotification, Notification},
  query::Page,
  repository::Repository,
};

use crate::error::ApiError;

/// Body of every non-entity success response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
  pub message: String,
}

impl Message {
  fn json(message: &str) -> Json<Message> { Json(Message { message: message.to_owned() }) }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub page: Option<i64>,
  pub size: Option<i64>,
  pub sort: Option<String>,
}

/// `GET /notifications/:userId[?page=0][&size=10][&sort=createdAt,desc]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<String>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<Notification>>, ApiError>
where
  S: Repository<Notification>,
{
  let Query(params) = params?;
  let request = notification::page_request(params.page, params.size, params.sort.as_deref())?;
  let page = notification::list_by_user(&*store, &user_id, &request)
    .await
    .map_err(ApiError::context("Error fetching notifications"))?;
  Ok(Json(page))
}

/// `GET /notifications/:userId/unread`
pub async fn unread<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError>
where
  S: Repository<Notification>,
{
  let unread = notification::list_unread(&*store, &user_id)
    .await
    .map_err(ApiError::context("Error fetching unread notifications"))?;
  Ok(Json(unread))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /notifications` — returns 201 + the stored [`Notification`].
///
/// A storage failure here is answered with 400, not 500.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewNotification>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Repository<Notification>,
{
  let Json(input) = body?;
  let stored = notification::create(&*store, input)
    .await
    .map_err(|e| match e {
      CoreError::Storage(source) => {
        tracing::error!(error = %source, "notification could not be stored");
        ApiError::InvalidRequest(format!("notification could not be stored: {source}"))
      }
      other => other.into(),
    })?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Read state ───────────────────────────────────────────────────────────────

/// `PUT /notifications/:id/markAsRead`
pub async fn mark_as_read<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: Repository<Notification>,
{
  let outcome = notification::mark_as_read(&*store, &id)
    .await
    .map_err(ApiError::context("Error marking notification as read"))?;
  Ok(Message::json(outcome.message()))
}

/// `PUT /notifications/markAllAsRead/:userId`
pub async fn mark_all_as_read<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: Repository<Notification>,
{
  notification::mark_all_as_read(&*store, &user_id)
    .await
    .map_err(ApiError::context("Error marking notifications as read"))?;
  Ok(Message::json("All notifications marked as read"))
}

// ─── Shadowed ids ─────────────────────────────────────────────────────────────

fn no_such_route(prefix: &str, segment: &str) -> ApiError {
  ApiError::NotFound(format!("no resource at /api/v1/notifications/{prefix}/{segment}"))
}

async fn unread_for<S>(
  store: Arc<S>,
  user_id: &'static str,
  segment: &str,
) -> Result<Json<Vec<Notification>>, ApiError>
where
  S: Repository<Notification>,
{
  if segment != "unread" {
    return Err(no_such_route(user_id, segment));
  }
  unread(State(store), Path(user_id.to_owned())).await
}

/// `GET /notifications/user/unread`: unread notifications of user `user`.
pub async fn unread_for_user_named_user<S>(
  State(store): State<Arc<S>>,
  Path(segment): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError>
where
  S: Repository<Notification>,
{
  unread_for(store, "user", &segment).await
}

/// `GET /notifications/markAllAsRead/unread`: unread notifications of user
/// `markAllAsRead`.
pub async fn unread_for_user_named_mark_all<S>(
  State(store): State<Arc<S>>,
  Path(segment): Path<String>,
) -> Result<Json<Vec<Notification>>, ApiError>
where
  S: Repository<Notification>,
{
  unread_for(store, "markAllAsRead", &segment).await
}

/// `PUT /notifications/user/markAsRead`: marks notification `user` as read.
pub async fn mark_notification_named_user_as_read<S>(
  State(store): State<Arc<S>>,
  Path(segment): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: Repository<Notification>,
{
  if segment != "markAsRead" {
    return Err(no_such_route("user", &segment));
  }
  mark_as_read(State(store), Path("user".to_owned())).await
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /notifications/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: Repository<Notification>,
{
  notification::delete(&*store, &id)
    .await
    .map_err(ApiError::context("Error deleting notification"))?;
  Ok(Message::json("Notification deleted successfully"))
}

/// `DELETE /notifications/user/:userId`
pub async fn delete_for_user<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: Repository<Notification>,
{
  notification::delete_all_for_user(&*store, &user_id)
    .await
    .map_err(ApiError::context("Error deleting user notifications"))?;
  Ok(Message::json("All user notifications deleted successfully"))
}
