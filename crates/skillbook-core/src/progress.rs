//! Learning-progress entries and the operations over them.
//!
//! Entries are stored exactly as the client sends them. Update is a full
//! replace of every field except the id; delete never checks existence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  repository::{Entity, Repository},
};

const ENTITY: &str = "learning progress";

/// One learner's record of working on a skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:              Option<String>,
  pub skill_title:     Option<String>,
  pub description:     Option<String>,
  #[serde(rename = "postOwnerID")]
  pub post_owner_id:   Option<String>,
  pub post_owner_name: Option<String>,
  pub field:           Option<String>,
  pub start_date:      Option<NaiveDate>,
  pub end_date:        Option<NaiveDate>,
  pub level:           Option<String>,
}

impl LearningProgress {
  /// Overwrite every mutable field with the values in `other`. The id is
  /// left untouched, whatever `other` carries.
  pub fn replace_fields(&mut self, other: LearningProgress) {
    let LearningProgress {
      id: _,
      skill_title,
      description,
      post_owner_id,
      post_owner_name,
      field,
      start_date,
      end_date,
      level,
    } = other;

    self.skill_title = skill_title;
    self.description = description;
    self.post_owner_id = post_owner_id;
    self.post_owner_name = post_owner_name;
    self.field = field;
    self.start_date = start_date;
    self.end_date = end_date;
    self.level = level;
  }
}

impl Entity for LearningProgress {
  const COLLECTION: &'static str = "learning_progress";
  const FIELDS: &'static [&'static str] = &[
    "id",
    "skillTitle",
    "description",
    "postOwnerID",
    "postOwnerName",
    "field",
    "startDate",
    "endDate",
    "level",
  ];

  fn id(&self) -> Option<&str> { self.id.as_deref() }

  fn set_id(&mut self, id: String) { self.id = Some(id); }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Persist `entry` as given and return it with its stored id.
pub async fn create<R>(repo: &R, entry: LearningProgress) -> Result<LearningProgress>
where
  R: Repository<LearningProgress>,
{
  let stored = repo.save(entry).await.map_err(Error::storage)?;
  tracing::info!(id = ?stored.id, "learning progress created");
  Ok(stored)
}

pub async fn list_all<R>(repo: &R) -> Result<Vec<LearningProgress>>
where
  R: Repository<LearningProgress>,
{
  repo.find_all().await.map_err(Error::storage)
}

pub async fn get<R>(repo: &R, id: &str) -> Result<LearningProgress>
where
  R: Repository<LearningProgress>,
{
  repo
    .find_by_id(id)
    .await
    .map_err(Error::storage)?
    .ok_or_else(|| Error::not_found(ENTITY, id))
}

/// Replace every field of entry `id` with those of `entry`.
pub async fn update<R>(repo: &R, id: &str, entry: LearningProgress) -> Result<LearningProgress>
where
  R: Repository<LearningProgress>,
{
  let mut stored = get(repo, id).await?;
  stored.replace_fields(entry);
  let stored = repo.save(stored).await.map_err(Error::storage)?;
  tracing::info!(id, "learning progress updated");
  Ok(stored)
}

/// Delete entry `id`. A missing id is not an error.
pub async fn delete<R>(repo: &R, id: &str) -> Result<()>
where
  R: Repository<LearningProgress>,
{
  repo.delete_by_id(id).await.map_err(Error::storage)?;
  tracing::info!(id, "learning progress deleted");
  Ok(())
}
