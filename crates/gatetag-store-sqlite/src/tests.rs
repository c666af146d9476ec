//! Integration tests for `SqliteStore` against an in-memory database.

use gatetag_core::{
  log::{LogEntry, LogStatus},
  store::{InsertOutcome, LogStore, RegistrationStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn entry(tag_id: &str, status: LogStatus, logged_at: &str) -> LogEntry {
  LogEntry {
    tag_id:    tag_id.to_owned(),
    status,
    logged_at: logged_at.to_owned(),
  }
}

// ─── Registrations ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find() {
  let s = store().await;

  let outcome = s.insert_if_absent("TAG1", true).await.unwrap();
  assert_eq!(outcome, InsertOutcome::Created);

  let found = s.find("TAG1").await.unwrap().unwrap();
  assert_eq!(found.tag_id, "TAG1");
  assert!(found.status);
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  assert!(s.find("NOPE").await.unwrap().is_none());
}

#[tokio::test]
async fn insert_if_absent_preserves_existing_status() {
  let s = store().await;

  s.insert_if_absent("TAG1", true).await.unwrap();
  let outcome = s.insert_if_absent("TAG1", false).await.unwrap();
  assert_eq!(outcome, InsertOutcome::AlreadyExists);

  // The original status survives the rejected insert.
  assert!(s.find("TAG1").await.unwrap().unwrap().status);
}

#[tokio::test]
async fn update_if_present_returns_previous_status() {
  let s = store().await;

  s.insert_if_absent("TAG1", true).await.unwrap();
  let previous = s.update_if_present("TAG1", false).await.unwrap();
  assert_eq!(previous, Some(true));
  assert!(!s.find("TAG1").await.unwrap().unwrap().status);
}

#[tokio::test]
async fn update_if_present_missing_creates_nothing() {
  let s = store().await;

  let previous = s.update_if_present("GHOST", true).await.unwrap();
  assert_eq!(previous, None);
  assert!(s.find("GHOST").await.unwrap().is_none());
}

#[tokio::test]
async fn update_to_same_status_still_reports_previous() {
  let s = store().await;

  s.insert_if_absent("TAG1", true).await.unwrap();
  let previous = s.update_if_present("TAG1", true).await.unwrap();
  assert_eq!(previous, Some(true));
}

#[tokio::test]
async fn list_by_status_returns_exact_subset() {
  let s = store().await;

  s.insert_if_absent("A", true).await.unwrap();
  s.insert_if_absent("B", false).await.unwrap();
  s.insert_if_absent("C", true).await.unwrap();
  s.insert_if_absent("D", false).await.unwrap();

  let all = RegistrationStore::list_all(&s).await.unwrap();
  assert_eq!(all.len(), 4);

  let mut active: Vec<_> = s
    .list_by_status(true)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.tag_id)
    .collect();
  active.sort();
  assert_eq!(active, vec!["A", "C"]);

  let inactive = s.list_by_status(false).await.unwrap();
  assert_eq!(inactive.len(), 2);
  assert!(inactive.iter().all(|r| !r.status));
}

// ─── Logs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn logs_list_newest_first() {
  let s = store().await;

  // Inserted out of order on purpose.
  s.append(entry("A", LogStatus::Active, "2024-01-02 00:00:00"))
    .await
    .unwrap();
  s.append(entry("B", LogStatus::Inactive, "2024-01-01 00:00:00"))
    .await
    .unwrap();
  s.append(entry("C", LogStatus::Active, "2024-01-03 00:00:00"))
    .await
    .unwrap();

  let stamps: Vec<_> = LogStore::list_all(&s)
    .await
    .unwrap()
    .into_iter()
    .map(|e| e.logged_at)
    .collect();
  assert_eq!(
    stamps,
    vec![
      "2024-01-03 00:00:00",
      "2024-01-02 00:00:00",
      "2024-01-01 00:00:00",
    ]
  );
}

#[tokio::test]
async fn equal_timestamps_break_ties_by_insertion_order() {
  let s = store().await;

  s.append(entry("FIRST", LogStatus::Active, "2024-01-01 12:00:00"))
    .await
    .unwrap();
  s.append(entry("SECOND", LogStatus::Inactive, "2024-01-01 12:00:00"))
    .await
    .unwrap();

  let entries = LogStore::list_all(&s).await.unwrap();
  assert_eq!(entries[0].tag_id, "SECOND");
  assert_eq!(entries[1].tag_id, "FIRST");
}

#[tokio::test]
async fn unknown_status_round_trips_through_null() {
  let s = store().await;

  s.append(entry("GHOST", LogStatus::Unknown, "2024-01-01 00:00:00"))
    .await
    .unwrap();
  s.append(entry("TAG1", LogStatus::Active, "2024-01-02 00:00:00"))
    .await
    .unwrap();

  let entries = LogStore::list_all(&s).await.unwrap();
  assert_eq!(entries[0].status, LogStatus::Active);
  assert_eq!(entries[1].status, LogStatus::Unknown);
  assert_eq!(entries[1].status.as_bool(), None);
}
