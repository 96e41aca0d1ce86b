//! [`SqliteStore`] — the SQLite implementation of [`Repository`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, params_from_iter, types::Value};

use skillbook_core::{
  query::{Filter, Page, PageRequest},
  repository::{Entity, Repository},
};

use crate::{
  Result,
  encode::{
    assign_id, decode_document, encode_direction, encode_document, field_path, where_clause,
  },
  schema::SCHEMA,
};

const UPSERT: &str = "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
   ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Skillbook document store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(?path, "document store opened");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT id, body` query and decode every row as `E`.
  async fn query_documents<E: Entity>(&self, sql: String, params: Vec<Value>) -> Result<Vec<E>> {
    let raws: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(id, body)| decode_document(id, &body))
      .collect()
  }

  async fn count(&self, where_sql: String, params: Vec<Value>) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!("SELECT COUNT(*) FROM documents WHERE {where_sql}"),
          params_from_iter(params),
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(u64::try_from(n).unwrap_or_default())
  }
}

// ─── Repository impl ─────────────────────────────────────────────────────────

impl<E: Entity> Repository<E> for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn save(&self, mut entity: E) -> Result<E> {
    let id   = assign_id(&mut entity);
    let body = encode_document(&entity)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(UPSERT, rusqlite::params![E::COLLECTION, id, body])?;
        Ok(())
      })
      .await?;

    Ok(entity)
  }

  /// Saves the whole batch in one transaction.
  async fn save_all(&self, mut entities: Vec<E>) -> Result<Vec<E>> {
    let docs = entities
      .iter_mut()
      .map(|e| -> Result<(String, String)> {
        let id = assign_id(e);
        Ok((id, encode_document(e)?))
      })
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(UPSERT)?;
          for (id, body) in &docs {
            stmt.execute(rusqlite::params![E::COLLECTION, id, body])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(entities)
  }

  async fn delete_by_id(&self, id: &str) -> Result<()> {
    let id = id.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
          rusqlite::params![E::COLLECTION, id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_by(&self, filter: &Filter) -> Result<u64> {
    let (where_sql, params) = where_clause(E::COLLECTION, filter);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM documents WHERE {where_sql}"),
          params_from_iter(params),
        )?)
      })
      .await?;
    Ok(removed as u64)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_by_id(&self, id: &str) -> Result<Option<E>> {
    let id = id.to_owned();

    let raw: Option<(String, String)> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2",
            rusqlite::params![E::COLLECTION, id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
          )
          .optional()?)
      })
      .await?;

    raw.map(|(id, body)| decode_document(id, &body)).transpose()
  }

  async fn find_all(&self) -> Result<Vec<E>> {
    Repository::<E>::find_by(self, &Filter::new()).await
  }

  async fn find_by(&self, filter: &Filter) -> Result<Vec<E>> {
    let (where_sql, params) = where_clause(E::COLLECTION, filter);
    self
      .query_documents(format!("SELECT id, body FROM documents WHERE {where_sql}"), params)
      .await
  }

  async fn find_page(&self, filter: &Filter, request: &PageRequest) -> Result<Page<E>> {
    let (where_sql, mut params) = where_clause(E::COLLECTION, filter);
    let total = self.count(where_sql.clone(), params.clone()).await?;

    let sql = format!(
      "SELECT id, body FROM documents WHERE {where_sql}
       ORDER BY json_extract(body, ?) {}, id ASC
       LIMIT ? OFFSET ?",
      encode_direction(request.sort.direction),
    );
    params.push(Value::Text(field_path(&request.sort.field)));
    params.push(Value::Integer(i64::try_from(request.size).unwrap_or(i64::MAX)));
    params.push(Value::Integer(i64::try_from(request.offset()).unwrap_or(i64::MAX)));

    let content = self.query_documents(sql, params).await?;
    Ok(Page::new(content, request, total))
  }

  async fn exists_by_id(&self, id: &str) -> Result<bool> {
    let id = id.to_owned();

    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT EXISTS (SELECT 1 FROM documents WHERE collection = ?1 AND id = ?2)",
          rusqlite::params![E::COLLECTION, id],
          |row| row.get::<_, bool>(0),
        )?)
      })
      .await?;
    Ok(exists)
  }
}
