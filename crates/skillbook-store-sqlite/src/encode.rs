//! Encoding helpers between core query types and the SQL fragments and
//! parameters that evaluate them against JSON documents.
//!
//! Field names never reach the SQL text: they are bound as JSON paths
//! (`$.userId`) to `json_extract(body, ?)`.

use rusqlite::types::Value;
use skillbook_core::{
  query::{FieldValue, Filter, SortDirection},
  repository::Entity,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Ids ─────────────────────────────────────────────────────────────────────

pub fn new_id() -> String { Uuid::new_v4().simple().to_string() }

/// Return the entity's id, assigning a fresh one first if it has none or
/// only a blank one.
pub fn assign_id<E: Entity>(entity: &mut E) -> String {
  if let Some(id) = entity.id().filter(|id| !id.trim().is_empty()) {
    return id.to_owned();
  }
  let id = new_id();
  entity.set_id(id.clone());
  id
}

// ─── Documents ───────────────────────────────────────────────────────────────

pub fn encode_document<E: Entity>(entity: &E) -> Result<String> {
  Ok(serde_json::to_string(entity)?)
}

pub fn decode_document<E: Entity>(id: String, body: &str) -> Result<E> {
  serde_json::from_str(body).map_err(|source| Error::CorruptDocument {
    collection: E::COLLECTION,
    id,
    source,
  })
}

// ─── Filters ─────────────────────────────────────────────────────────────────

pub fn field_path(field: &str) -> String { format!("$.{field}") }

pub fn encode_field_value(v: &FieldValue) -> Value {
  match v {
    FieldValue::Text(s) => Value::Text(s.clone()),
    // json_extract yields 1/0 for JSON true/false.
    FieldValue::Bool(b) => Value::Integer(i64::from(*b)),
  }
}

/// Build a `WHERE` body selecting documents of `collection` that match
/// `filter`, plus its positional parameters in order.
pub fn where_clause(collection: &'static str, filter: &Filter) -> (String, Vec<Value>) {
  let mut sql = String::from("collection = ?");
  let mut params = vec![Value::Text(collection.to_owned())];

  for (field, value) in filter.conditions() {
    sql.push_str(" AND json_extract(body, ?) = ?");
    params.push(Value::Text(field_path(field)));
    params.push(encode_field_value(value));
  }

  (sql, params)
}

pub fn encode_direction(d: SortDirection) -> &'static str {
  match d {
    SortDirection::Asc => "ASC",
    SortDirection::Desc => "DESC",
  }
}
