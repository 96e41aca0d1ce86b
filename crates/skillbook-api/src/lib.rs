//! JSON REST API for Skillbook.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`Repository`] for both resource types. CORS, tracing, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = skillbook_api::api_router(Arc::new(store)).layer(cors);
//! ```

pub mod error;
pub mod notifications;
pub mod progress;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use skillbook_core::{notification::Notification, progress::LearningProgress, repository::Repository};

pub use error::ApiError;

/// Build the API router for `store`.
///
/// Learning progress lives at the root (`/learningProgress`), notifications
/// under `/api/v1/notifications`. The returned `Router<()>` can be merged into
/// any parent router regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: Repository<LearningProgress> + Repository<Notification> + 'static,
{
  Router::new()
    // Learning progress
    .route("/learningProgress", get(progress::list::<S>).post(progress::create::<S>))
    .route(
      "/learningProgress/{id}",
      get(progress::get_one::<S>)
        .put(progress::update::<S>)
        .delete(progress::delete::<S>),
    )
    // Notifications. `{id}` is a user id for GET and a notification id for
    // DELETE; both share one segment.
    .route("/api/v1/notifications", post(notifications::create::<S>))
    .route(
      "/api/v1/notifications/{id}",
      get(notifications::list::<S>).delete(notifications::delete_one::<S>),
    )
    .route("/api/v1/notifications/{id}/unread", get(notifications::unread::<S>))
    .route("/api/v1/notifications/{id}/markAsRead", put(notifications::mark_as_read::<S>))
    .route(
      "/api/v1/notifications/markAllAsRead/{user_id}",
      get(notifications::unread_for_user_named_mark_all::<S>)
        .put(notifications::mark_all_as_read::<S>),
    )
    .route(
      "/api/v1/notifications/user/{user_id}",
      get(notifications::unread_for_user_named_user::<S>)
        .put(notifications::mark_notification_named_user_as_read::<S>)
        .delete(notifications::delete_for_user::<S>),
    )
    .with_state(store)
}
