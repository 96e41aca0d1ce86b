//! The `Repository` trait and the `Entity` contract it stores.
//!
//! Repositories are implemented by storage backends (e.g.
//! `skillbook-store-sqlite`). The operations in [`crate::progress`] and
//! [`crate::notification`] depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::query::{Filter, Page, PageRequest};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A flat document with a string id, stored in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
  /// Name of the collection documents of this type live in.
  const COLLECTION: &'static str;

  /// Serialised field names that may be used for sorting.
  const FIELDS: &'static [&'static str];

  /// The id, if one has been assigned.
  fn id(&self) -> Option<&str>;

  fn set_id(&mut self, id: String);
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Generic storage access for one entity type.
///
/// `save` is an upsert keyed by id: an entity without an id (or with a blank
/// one) is given a fresh id by the backend, one with an id replaces any stored
/// document with the same id.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait Repository<E: Entity>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert or replace `entity` and return it as stored, id included.
  fn save(&self, entity: E) -> impl Future<Output = Result<E, Self::Error>> + Send + '_;

  /// Save every entity in `entities`. Backends are not required to make this
  /// atomic.
  fn save_all(
    &self,
    entities: Vec<E>,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Delete the document with `id`. Deleting a missing id is not an error.
  fn delete_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete every document matching `filter`; returns how many were removed.
  fn delete_by<'a>(
    &'a self,
    filter: &'a Filter,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a document by id. Returns `None` if not found.
  fn find_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + 'a;

  /// Every document in the collection, in no particular order.
  fn find_all(&self) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Every document matching `filter`, in no particular order.
  fn find_by<'a>(
    &'a self,
    filter: &'a Filter,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + 'a;

  /// One sorted page of the documents matching `filter`.
  fn find_page<'a>(
    &'a self,
    filter: &'a Filter,
    request: &'a PageRequest,
  ) -> impl Future<Output = Result<Page<E>, Self::Error>> + Send + 'a;

  fn exists_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
