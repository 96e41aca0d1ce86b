//! Integration tests for `SqliteStore` against an in-memory database,
//! covering the repository contract and the resource operations built on it.

use chrono::NaiveDate;
use skillbook_core::{
  Error as CoreError,
  notification::{self, NewNotification, Notification, ReadOutcome},
  progress::{self, LearningProgress},
  query::{Filter, PageRequest, Sort, SortDirection},
  repository::{Entity, Repository},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn entry(title: &str) -> LearningProgress {
  LearningProgress {
    id:              None,
    skill_title:     Some(title.into()),
    description:     Some("weekly practice".into()),
    post_owner_id:   Some("u1".into()),
    post_owner_name: Some("Ada".into()),
    field:           Some("programming".into()),
    start_date:      NaiveDate::from_ymd_opt(2024, 2, 1),
    end_date:        NaiveDate::from_ymd_opt(2024, 4, 30),
    level:           Some("intermediate".into()),
  }
}

/// Store a notification and give the clock a moment so `createdAt` differs
/// between consecutive calls.
async fn notify(s: &SqliteStore, user: &str, message: &str) -> Notification {
  let n = notification::create(s, NewNotification::new(user, message))
    .await
    .unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  n
}

async fn stored(s: &SqliteStore, id: &str) -> Option<Notification> {
  Repository::<Notification>::find_by_id(s, id).await.unwrap()
}

// ─── Repository ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_assigns_id_when_absent_or_blank() {
  let s = store().await;

  let a = s.save(entry("Rust")).await.unwrap();
  assert!(a.id.as_deref().is_some_and(|id| !id.is_empty()));

  let blank = LearningProgress { id: Some("  ".into()), ..entry("Go") };
  let b = s.save(blank).await.unwrap();
  assert_ne!(b.id.as_deref(), Some("  "));
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn save_keeps_client_id_and_upserts() {
  let s = store().await;

  let first = LearningProgress { id: Some("lp-7".into()), ..entry("Rust") };
  s.save(first).await.unwrap();
  let second = LearningProgress { id: Some("lp-7".into()), ..entry("Zig") };
  s.save(second).await.unwrap();

  let all = Repository::<LearningProgress>::find_all(&s).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].skill_title.as_deref(), Some("Zig"));
}

#[tokio::test]
async fn collections_are_isolated() {
  let s = store().await;
  s.save(LearningProgress { id: Some("shared".into()), ..entry("Rust") })
    .await
    .unwrap();

  let found = Repository::<Notification>::find_by_id(&s, "shared").await.unwrap();
  assert!(found.is_none());
  assert!(!Repository::<Notification>::exists_by_id(&s, "shared").await.unwrap());
  assert!(Repository::<LearningProgress>::exists_by_id(&s, "shared").await.unwrap());
}

#[tokio::test]
async fn find_by_matches_text_and_bool_fields() {
  let s = store().await;
  let a = notify(&s, "u1", "one").await;
  notify(&s, "u1", "two").await;
  notify(&s, "u2", "three").await;
  notification::mark_as_read(&s, a.id().unwrap()).await.unwrap();

  let u1 = Repository::<Notification>::find_by(&s, &Filter::new().eq("userId", "u1"))
    .await
    .unwrap();
  assert_eq!(u1.len(), 2);

  let unread_filter = Filter::new().eq("userId", "u1").eq("read", false);
  let unread = Repository::<Notification>::find_by(&s, &unread_filter)
    .await
    .unwrap();
  assert_eq!(unread.len(), 1);
  assert_eq!(unread[0].message(), "two");
}

#[tokio::test]
async fn find_page_slices_and_counts() {
  let s = store().await;
  for i in 0..5 {
    notify(&s, "u1", &format!("m{i}")).await;
  }

  let request = PageRequest::new(1, 2, Sort::new("createdAt", SortDirection::Asc)).unwrap();
  let page = Repository::<Notification>::find_page(&s, &Filter::new().eq("userId", "u1"), &request)
    .await
    .unwrap();

  assert_eq!(page.total_elements, 5);
  assert_eq!(page.total_pages, 3);
  let messages: Vec<_> = page.content.iter().map(Notification::message).collect();
  assert_eq!(messages, ["m2", "m3"]);
}

#[tokio::test]
async fn delete_by_reports_removed_count() {
  let s = store().await;
  notify(&s, "u1", "a").await;
  notify(&s, "u1", "b").await;
  notify(&s, "u2", "c").await;

  let removed = Repository::<Notification>::delete_by(&s, &Filter::new().eq("userId", "u1"))
    .await
    .unwrap();
  assert_eq!(removed, 2);

  let rest = Repository::<Notification>::find_all(&s).await.unwrap();
  assert_eq!(rest.len(), 1);
  assert_eq!(rest[0].user_id(), "u2");
}

#[tokio::test]
async fn corrupt_document_is_reported() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO documents (collection, id, body) VALUES (?1, 'bad', '{\"userId\": 5}')",
        rusqlite::params![Notification::COLLECTION],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let err = Repository::<Notification>::find_by_id(&s, "bad").await.unwrap_err();
  assert!(matches!(err, crate::Error::CorruptDocument { .. }), "{err}");
}

// ─── Learning progress ───────────────────────────────────────────────────────

#[tokio::test]
async fn progress_create_then_get_round_trips() {
  let s = store().await;
  let created = progress::create(&s, entry("Rust")).await.unwrap();
  let id = created.id.clone().unwrap();

  let fetched = progress::get(&s, &id).await.unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn progress_list_all_returns_everything() {
  let s = store().await;
  progress::create(&s, entry("Rust")).await.unwrap();
  progress::create(&s, entry("Go")).await.unwrap();

  assert_eq!(progress::list_all(&s).await.unwrap().len(), 2);
}

#[tokio::test]
async fn progress_get_missing_is_not_found() {
  let s = store().await;
  let err = progress::get(&s, "nope").await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound { ref id, .. } if id == "nope"));
}

#[tokio::test]
async fn progress_update_replaces_fields_and_keeps_id() {
  let s = store().await;
  let created = progress::create(&s, entry("Rust")).await.unwrap();
  let id = created.id.clone().unwrap();

  let replacement = LearningProgress {
    id:              Some("different".into()),
    skill_title:     Some("Haskell".into()),
    description:     None,
    post_owner_id:   Some("u9".into()),
    post_owner_name: Some("Grace".into()),
    field:           Some("fp".into()),
    start_date:      NaiveDate::from_ymd_opt(2025, 1, 1),
    end_date:        None,
    level:           Some("expert".into()),
  };
  let updated = progress::update(&s, &id, replacement).await.unwrap();

  assert_eq!(updated.id.as_deref(), Some(id.as_str()));
  assert_eq!(updated.skill_title.as_deref(), Some("Haskell"));
  assert_eq!(updated.description, None);
  assert_eq!(updated.post_owner_id.as_deref(), Some("u9"));
  assert_eq!(updated.end_date, None);

  assert_eq!(progress::get(&s, &id).await.unwrap(), updated);
  assert!(matches!(
    progress::get(&s, "different").await,
    Err(CoreError::NotFound { .. })
  ));
}

#[tokio::test]
async fn progress_update_missing_is_not_found() {
  let s = store().await;
  let err = progress::update(&s, "nope", entry("Rust")).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound { .. }));
  assert!(progress::list_all(&s).await.unwrap().is_empty());
}

#[tokio::test]
async fn progress_delete_is_silent_for_missing_ids() {
  let s = store().await;
  let created = progress::create(&s, entry("Rust")).await.unwrap();
  let id = created.id.unwrap();

  progress::delete(&s, &id).await.unwrap();
  progress::delete(&s, &id).await.unwrap();
  progress::delete(&s, "never-existed").await.unwrap();

  assert!(matches!(progress::get(&s, &id).await, Err(CoreError::NotFound { .. })));
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[tokio::test]
async fn notification_create_stamps_server_fields() {
  let s = store().await;
  let before = chrono::Utc::now();
  let n = notification::create(&s, NewNotification::new("u1", "hello"))
    .await
    .unwrap();

  assert!(n.id().is_some());
  assert!(!n.is_read());
  assert_eq!(n.read_at(), None);
  assert!(n.created_at() >= before - chrono::TimeDelta::seconds(1));

  let stored = stored(&s, n.id().unwrap()).await;
  assert_eq!(stored.unwrap(), n);
}

#[tokio::test]
async fn created_and_read_notifications_equal_their_stored_form() {
  let s = store().await;
  for i in 0..20 {
    let n = notification::create(&s, NewNotification::new("u1", format!("n{i}")))
      .await
      .unwrap();
    assert_eq!(stored(&s, n.id().unwrap()).await.as_ref(), Some(&n));
  }

  notification::mark_all_as_read(&s, "u1").await.unwrap();
  let n = notification::create(&s, NewNotification::new("u1", "last"))
    .await
    .unwrap();
  notification::mark_as_read(&s, n.id().unwrap()).await.unwrap();

  for n in Repository::<Notification>::find_all(&s).await.unwrap() {
    let reloaded: Notification =
      serde_json::from_value(serde_json::to_value(&n).unwrap()).unwrap();
    assert_eq!(reloaded, n);
    assert_eq!(n.read_at().unwrap().timestamp_subsec_nanos() % 1_000, 0);
  }
}

#[tokio::test]
async fn notification_create_rejects_bad_user_id() {
  let s = store().await;
  let err = notification::create(&s, NewNotification::new("", "hello"))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::InvalidRequest(_)));

  let all = Repository::<Notification>::find_all(&s).await.unwrap();
  assert!(all.is_empty());
}

#[tokio::test]
async fn list_by_user_orders_newest_first() {
  let s = store().await;
  notify(&s, "u1", "first").await;
  notify(&s, "u1", "second").await;
  notify(&s, "u1", "third").await;
  notify(&s, "u2", "other").await;

  let request = notification::page_request(Some(0), Some(10), Some("createdAt,desc")).unwrap();
  let page = notification::list_by_user(&s, "u1", &request).await.unwrap();

  assert_eq!(page.total_elements, 3);
  let messages: Vec<_> = page.content.iter().map(Notification::message).collect();
  assert_eq!(messages, ["third", "second", "first"]);
}

#[tokio::test]
async fn list_unread_excludes_read() {
  let s = store().await;
  let a = notify(&s, "u1", "a").await;
  notify(&s, "u1", "b").await;
  notification::mark_as_read(&s, a.id().unwrap()).await.unwrap();

  let unread = notification::list_unread(&s, "u1").await.unwrap();
  assert_eq!(unread.len(), 1);
  assert_eq!(unread[0].message(), "b");
}

#[tokio::test]
async fn mark_as_read_is_idempotent() {
  let s = store().await;
  let n = notify(&s, "u1", "a").await;
  let id = n.id().unwrap();

  assert_eq!(notification::mark_as_read(&s, id).await.unwrap(), ReadOutcome::Marked);
  let first = stored(&s, id).await.unwrap();
  assert!(first.is_read());
  assert!(first.read_at().is_some());

  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  assert_eq!(
    notification::mark_as_read(&s, id).await.unwrap(),
    ReadOutcome::AlreadyRead
  );
  let second = stored(&s, id).await.unwrap();
  assert_eq!(second.read_at(), first.read_at());
}

#[tokio::test]
async fn mark_as_read_missing_is_not_found() {
  let s = store().await;
  let err = notification::mark_as_read(&s, "nope").await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn mark_all_as_read_touches_only_that_user() {
  let s = store().await;
  let already = notify(&s, "u1", "a").await;
  notification::mark_as_read(&s, already.id().unwrap()).await.unwrap();
  let before = stored(&s, already.id().unwrap()).await.unwrap();
  notify(&s, "u1", "b").await;
  notify(&s, "u1", "c").await;
  notify(&s, "u2", "d").await;

  assert_eq!(notification::mark_all_as_read(&s, "u1").await.unwrap(), 2);

  assert!(notification::list_unread(&s, "u1").await.unwrap().is_empty());
  assert_eq!(notification::list_unread(&s, "u2").await.unwrap().len(), 1);

  let after = stored(&s, already.id().unwrap()).await.unwrap();
  assert_eq!(after.read_at(), before.read_at());
}

#[tokio::test]
async fn mark_all_as_read_with_nothing_unread_is_a_no_op() {
  let s = store().await;
  assert_eq!(notification::mark_all_as_read(&s, "u1").await.unwrap(), 0);
}

#[tokio::test]
async fn notification_delete_missing_is_not_found() {
  let s = store().await;
  let n = notify(&s, "u1", "a").await;
  let id = n.id().unwrap();

  notification::delete(&s, id).await.unwrap();
  let err = notification::delete(&s, id).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn delete_all_for_user_leaves_others() {
  let s = store().await;
  notify(&s, "u1", "a").await;
  notify(&s, "u1", "b").await;
  notify(&s, "u2", "c").await;

  assert_eq!(notification::delete_all_for_user(&s, "u1").await.unwrap(), 2);
  assert_eq!(notification::delete_all_for_user(&s, "u1").await.unwrap(), 0);
  assert_eq!(notification::list_unread(&s, "u2").await.unwrap().len(), 1);
}
