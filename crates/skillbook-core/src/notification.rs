//! User notifications and the operations over them.
//!
//! A [`Notification`] can only be created from a [`NewNotification`] through
//! [`Notification::new`], which stamps the creation time and starts it
//! unread. The only mutation afterwards is the one-way transition to read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  query::{Filter, Page, PageRequest, Sort},
  repository::{Entity, Repository},
  timestamp, validate,
};

const ENTITY: &str = "notification";

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_SIZE: i64 = 10;
pub const DEFAULT_SORT: &str = "createdAt,desc";

// ─── Types ───────────────────────────────────────────────────────────────────

/// The client-supplied part of a notification.
///
/// Anything else in a create request body (`id`, `createdAt`, `read`,
/// `readAt`) is ignored during deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
  pub user_id: String,
  pub message: String,
}

impl NewNotification {
  pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
    Self { user_id: user_id.into(), message: message.into() }
  }

  pub fn validate(&self) -> Result<()> {
    validate::user_id(&self.user_id)?;
    Ok(())
  }
}

/// A stored notification.
///
/// `read_at` is `Some` exactly when `read` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  id:         Option<String>,
  user_id:    String,
  message:    String,
  #[serde(with = "crate::timestamp")]
  created_at: DateTime<Utc>,
  read:       bool,
  #[serde(with = "crate::timestamp::option", default)]
  read_at:    Option<DateTime<Utc>>,
}

/// What [`Notification::mark_read`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
  Marked,
  AlreadyRead,
}

impl ReadOutcome {
  pub fn message(self) -> &'static str {
    match self {
      Self::Marked => "Notification marked as read",
      Self::AlreadyRead => "Notification already marked as read",
    }
  }
}

impl Notification {
  /// Build an unread notification created at `now`.
  pub fn new(input: NewNotification, now: DateTime<Utc>) -> Self {
    Self {
      id:         None,
      user_id:    input.user_id,
      message:    input.message,
      created_at: now,
      read:       false,
      read_at:    None,
    }
  }

  pub fn user_id(&self) -> &str { &self.user_id }

  pub fn message(&self) -> &str { &self.message }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn is_read(&self) -> bool { self.read }

  pub fn read_at(&self) -> Option<DateTime<Utc>> { self.read_at }

  /// Transition to read at `at`. A notification that is already read keeps
  /// its original `read_at`.
  pub fn mark_read(&mut self, at: DateTime<Utc>) -> ReadOutcome {
    if self.read {
      return ReadOutcome::AlreadyRead;
    }
    self.read = true;
    self.read_at = Some(at);
    ReadOutcome::Marked
  }
}

impl Entity for Notification {
  const COLLECTION: &'static str = "notifications";
  const FIELDS: &'static [&'static str] =
    &["id", "userId", "message", "createdAt", "read", "readAt"];

  fn id(&self) -> Option<&str> { self.id.as_deref() }

  fn set_id(&mut self, id: String) { self.id = Some(id); }
}

// ─── Query helpers ───────────────────────────────────────────────────────────

fn for_user(user_id: &str) -> Filter { Filter::new().eq("userId", user_id) }

fn unread_for_user(user_id: &str) -> Filter { for_user(user_id).eq("read", false) }

/// Build a validated [`PageRequest`] from raw list parameters, filling in the
/// defaults (`page=0`, `size=10`, `sort=createdAt,desc`).
///
/// The sort field must be one of the serialised notification fields (`id`,
/// `userId`, `message`, `createdAt`, `read`, `readAt`); any other field is
/// [`Error::InvalidRequest`], as is a direction other than `asc`/`desc`.
pub fn page_request(
  page: Option<i64>,
  size: Option<i64>,
  sort: Option<&str>,
) -> Result<PageRequest> {
  let sort = Sort::parse(sort.unwrap_or(DEFAULT_SORT), Notification::FIELDS)?;
  PageRequest::new(
    page.unwrap_or(DEFAULT_PAGE),
    size.unwrap_or(DEFAULT_SIZE),
    sort,
  )
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// One page of `user_id`'s notifications.
pub async fn list_by_user<R>(
  repo: &R,
  user_id: &str,
  request: &PageRequest,
) -> Result<Page<Notification>>
where
  R: Repository<Notification>,
{
  let filter = for_user(validate::user_id(user_id)?);
  repo
    .find_page(&filter, request)
    .await
    .map_err(Error::storage)
}

/// Every unread notification for `user_id`, in no particular order.
pub async fn list_unread<R>(repo: &R, user_id: &str) -> Result<Vec<Notification>>
where
  R: Repository<Notification>,
{
  let filter = unread_for_user(validate::user_id(user_id)?);
  repo.find_by(&filter).await.map_err(Error::storage)
}

pub async fn create<R>(repo: &R, input: NewNotification) -> Result<Notification>
where
  R: Repository<Notification>,
{
  input.validate()?;
  let stored = repo
    .save(Notification::new(input, timestamp::now()))
    .await
    .map_err(Error::storage)?;
  tracing::info!(id = ?stored.id, user_id = %stored.user_id, "notification created");
  Ok(stored)
}

pub async fn mark_as_read<R>(repo: &R, id: &str) -> Result<ReadOutcome>
where
  R: Repository<Notification>,
{
  let id = validate::id(id)?;
  let mut notification = repo
    .find_by_id(id)
    .await
    .map_err(Error::storage)?
    .ok_or_else(|| Error::not_found(ENTITY, id))?;

  let outcome = notification.mark_read(timestamp::now());
  if outcome == ReadOutcome::Marked {
    repo.save(notification).await.map_err(Error::storage)?;
    tracing::info!(id, "notification marked as read");
  }
  Ok(outcome)
}

/// Mark every unread notification for `user_id` as read; returns how many
/// were changed.
pub async fn mark_all_as_read<R>(repo: &R, user_id: &str) -> Result<usize>
where
  R: Repository<Notification>,
{
  let filter = unread_for_user(validate::user_id(user_id)?);
  let mut unread = repo.find_by(&filter).await.map_err(Error::storage)?;
  if unread.is_empty() {
    return Ok(0);
  }

  let now = timestamp::now();
  for notification in &mut unread {
    notification.mark_read(now);
  }

  let count = unread.len();
  repo.save_all(unread).await.map_err(Error::storage)?;
  tracing::info!(user_id, count, "notifications marked as read");
  Ok(count)
}

/// Delete notification `id`; unlike learning progress, a missing id is
/// [`Error::NotFound`].
pub async fn delete<R>(repo: &R, id: &str) -> Result<()>
where
  R: Repository<Notification>,
{
  let id = validate::id(id)?;
  if !repo.exists_by_id(id).await.map_err(Error::storage)? {
    return Err(Error::not_found(ENTITY, id));
  }
  repo.delete_by_id(id).await.map_err(Error::storage)?;
  tracing::info!(id, "notification deleted");
  Ok(())
}

/// Delete every notification addressed to `user_id`.
pub async fn delete_all_for_user<R>(repo: &R, user_id: &str) -> Result<u64>
where
  R: Repository<Notification>,
{
  let filter = for_user(validate::user_id(user_id)?);
  let removed = repo.delete_by(&filter).await.map_err(Error::storage)?;
  tracing::info!(user_id, removed, "user notifications deleted");
  Ok(removed)
}
