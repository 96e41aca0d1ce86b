//! Input checks applied before any storage access.

use crate::{Error, Result};

/// Longest accepted recipient user id, in characters.
pub const MAX_USER_ID_LEN: usize = 50;

/// A recipient user id must be 1–50 characters and not entirely whitespace.
pub fn user_id(id: &str) -> Result<&str> {
  if id.trim().is_empty() {
    return Err(Error::invalid("user id must not be blank"));
  }
  let len = id.chars().count();
  if len > MAX_USER_ID_LEN {
    return Err(Error::invalid(format!(
      "user id must be at most {MAX_USER_ID_LEN} characters, got {len}"
    )));
  }
  Ok(id)
}

/// A document id addressed by path must not be blank.
pub fn id(id: &str) -> Result<&str> {
  if id.trim().is_empty() {
    return Err(Error::invalid("id must not be blank"));
  }
  Ok(id)
}
