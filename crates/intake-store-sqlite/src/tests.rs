//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use chrono::Utc;
use intake_core::{
  lead::{DEFAULT_STATE, LeadId, NewLead},
  store::{LeadStore, StoreError},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_lead(first: &str, email: &str) -> NewLead {
  NewLead::new(first, "Smith", email, "resume text").unwrap()
}

async fn seed(s: &SqliteStore, n: usize) {
  for i in 0..n {
    s.create(new_lead(&format!("Lead{i}"), &format!("lead{i}@example.com")))
      .await
      .unwrap();
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_defaults() {
  let s = store().await;

  let before = Utc::now();
  let lead = s.create(new_lead("Alice", "alice@example.com")).await.unwrap();
  let after = Utc::now();

  assert!(lead.id.0 > 0);
  assert_eq!(lead.first_name, "Alice");
  assert_eq!(lead.last_name, "Smith");
  assert_eq!(lead.email, "alice@example.com");
  assert_eq!(lead.resume, "resume text");
  assert_eq!(lead.state, DEFAULT_STATE);
  assert!(lead.created_at >= before && lead.created_at <= after);
}

#[tokio::test]
async fn create_ids_are_unique() {
  let s = store().await;
  let mut seen = HashSet::new();
  for i in 0..20 {
    let lead = s
      .create(new_lead("Alice", &format!("a{i}@example.com")))
      .await
      .unwrap();
    assert!(seen.insert(lead.id), "id {} reused", lead.id);
  }
}

#[tokio::test]
async fn created_lead_reads_back_identically() {
  let s = store().await;
  let lead = s.create(new_lead("Alice", "alice@example.com")).await.unwrap();

  let fetched = s.get_by_id(lead.id).await.unwrap();
  assert_eq!(fetched, Some(lead));
}

#[tokio::test]
async fn get_by_id_missing_returns_none() {
  let s = store().await;
  assert!(s.get_by_id(LeadId(42)).await.unwrap().is_none());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_respects_limit() {
  let s = store().await;
  seed(&s, 15).await;

  let page = s.list(0, 10).await.unwrap();
  assert_eq!(page.len(), 10);
}

#[tokio::test]
async fn list_window_is_suffix_of_full_order() {
  let s = store().await;
  seed(&s, 7).await;
  let all = s.list(0, 100).await.unwrap();
  assert_eq!(all.len(), 7);

  for skip in 0..9u64 {
    for limit in 1..9u64 {
      let page = s.list(skip, limit).await.unwrap();
      let expected: Vec<_> = all
        .iter()
        .skip(skip as usize)
        .take(limit as usize)
        .cloned()
        .collect();
      assert_eq!(page, expected, "skip={skip} limit={limit}");
    }
  }
}

#[tokio::test]
async fn list_is_ordered_by_id() {
  let s = store().await;
  seed(&s, 5).await;
  let all = s.list(0, 10).await.unwrap();
  assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn list_huge_window_does_not_overflow() {
  let s = store().await;
  seed(&s, 2).await;
  assert_eq!(s.list(0, u64::MAX).await.unwrap().len(), 2);
  assert!(s.list(u64::MAX, 10).await.unwrap().is_empty());
}

// ─── Update state ────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_state_changes_only_state() {
  let s = store().await;
  let lead = s.create(new_lead("Alice", "alice@example.com")).await.unwrap();

  let updated = s.update_state(lead.id, "REVIEWED".into()).await.unwrap();
  assert_eq!(updated.state, "REVIEWED");
  assert_eq!(updated.id, lead.id);
  assert_eq!(updated.first_name, lead.first_name);
  assert_eq!(updated.last_name, lead.last_name);
  assert_eq!(updated.email, lead.email);
  assert_eq!(updated.resume, lead.resume);
  assert_eq!(updated.created_at, lead.created_at);

  let fetched = s.get_by_id(lead.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_state_accepts_arbitrary_labels() {
  let s = store().await;
  let lead = s.create(new_lead("Alice", "alice@example.com")).await.unwrap();

  for label in ["", "reached out", "ÉTAT-λ", "PENDING"] {
    let updated = s.update_state(lead.id, label.into()).await.unwrap();
    assert_eq!(updated.state, label);
  }
}

#[tokio::test]
async fn update_state_is_idempotent() {
  let s = store().await;
  let lead = s.create(new_lead("Alice", "alice@example.com")).await.unwrap();

  let first = s.update_state(lead.id, "REVIEWED".into()).await.unwrap();
  let second = s.update_state(lead.id, "REVIEWED".into()).await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn update_state_missing_is_not_found_and_leaves_store_untouched() {
  let s = store().await;
  seed(&s, 3).await;
  let before = s.list(0, 100).await.unwrap();

  let err = s.update_state(LeadId(99999), "REVIEWED".into()).await.unwrap_err();
  assert!(matches!(err, Error::LeadNotFound(LeadId(99999))));
  assert!(err.is_not_found());

  assert_eq!(s.list(0, 100).await.unwrap(), before);
}

// ─── Durability ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn leads_survive_reopen() {
  let path = std::env::temp_dir().join(format!(
    "intake-store-{}-{}.db",
    std::process::id(),
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let lead = s.create(new_lead("Alice", "alice@example.com")).await.unwrap();
    s.update_state(lead.id, "REVIEWED".into()).await.unwrap();
    lead.id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let lead = s.get_by_id(id).await.unwrap().unwrap();
  assert_eq!(lead.state, "REVIEWED");
  drop(s);

  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
