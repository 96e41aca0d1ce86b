//! Query types shared by the repository trait and its backends: equality
//! filters, sort descriptors, and page requests.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::{Error, Result};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// A scalar a document field can be compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Text(String),
  Bool(bool),
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for FieldValue {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<bool> for FieldValue {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

/// A conjunction of field equality conditions over a document collection.
///
/// Field names are the serialised (camelCase) names of the entity's fields.
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
  conditions: Vec<(String, FieldValue)>,
}

impl Filter {
  pub fn new() -> Self { Self::default() }

  /// Require `field == value`.
  pub fn eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
    self.conditions.push((field.to_owned(), value.into()));
    self
  }

  pub fn conditions(&self) -> &[(String, FieldValue)] { &self.conditions }

  pub fn is_empty(&self) -> bool { self.conditions.is_empty() }
}

// ─── Sort ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
  #[strum(serialize = "asc")]
  Asc,
  #[strum(serialize = "desc")]
  Desc,
}

/// Sort order on a single document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
  pub field:     String,
  pub direction: SortDirection,
}

impl Sort {
  pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
    Self { field: field.into(), direction }
  }

  /// Parse a `field,direction` descriptor such as `createdAt,desc`.
  ///
  /// `field` must be one of `fields`; `direction` is `asc` or `desc` in any
  /// case. Anything after a second comma is ignored.
  pub fn parse(descriptor: &str, fields: &[&str]) -> Result<Self> {
    let mut parts = descriptor.split(',').map(str::trim);

    let field = parts.next().unwrap_or_default();
    let direction = parts
      .next()
      .ok_or_else(|| Error::invalid(format!("sort {descriptor:?} is not `field,direction`")))?;

    if !fields.contains(&field) {
      return Err(Error::invalid(format!("cannot sort by unknown field {field:?}")));
    }

    let direction = direction
      .parse::<SortDirection>()
      .map_err(|_| Error::invalid(format!("unknown sort direction {direction:?}")))?;

    Ok(Self::new(field, direction))
  }
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// A zero-based page index, a page size, and the order pages are cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u64,
  pub size: u64,
  pub sort: Sort,
}

impl PageRequest {
  /// Validate raw paging parameters: `page >= 0`, `size >= 1`.
  pub fn new(page: i64, size: i64, sort: Sort) -> Result<Self> {
    let page = u64::try_from(page)
      .map_err(|_| Error::invalid(format!("page must not be negative, got {page}")))?;
    let size = u64::try_from(size)
      .ok()
      .filter(|s| *s > 0)
      .ok_or_else(|| Error::invalid(format!("size must be positive, got {size}")))?;
    Ok(Self { page, size, sort })
  }

  /// Number of documents to skip before this page starts.
  pub fn offset(&self) -> u64 { self.page.saturating_mul(self.size) }
}

/// One page of results plus enough metadata to request the others.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub content:        Vec<T>,
  pub page:           u64,
  pub size:           u64,
  pub total_elements: u64,
  pub total_pages:    u64,
}

impl<T> Page<T> {
  pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
    Self {
      content,
      page: request.page,
      size: request.size,
      total_elements,
      total_pages: total_elements.div_ceil(request.size),
    }
  }
}
