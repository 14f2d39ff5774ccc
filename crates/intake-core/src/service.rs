//! [`LeadService`] runs the create-then-notify and state-update workflows.
//!
//! Persistence is the durability boundary: once [`LeadStore::create`] returns,
//! the lead is permanently recorded whatever happens to the notifications
//! afterwards. [`NotifyPolicy`] decides whether a notification failure is
//! still reported to the caller.

use std::sync::Arc;

use serde::Deserialize;

use crate::{
  Error, Result,
  lead::{Lead, LeadId, NewLead},
  notify::Notifier,
  store::{LeadStore, StoreError},
};

/// How [`LeadService::submit_lead`] treats a notifier failure that happens
/// after the lead has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
  /// The first failure aborts the request with [`Error::Delivery`]. The lead
  /// stays persisted and the staff alert is skipped if the prospect
  /// acknowledgment failed.
  #[default]
  Strict,
  /// Failures are logged and the persisted lead is returned. Both
  /// notifications are always attempted.
  BestEffort,
}

/// Orchestrates a [`LeadStore`] and a [`Notifier`].
pub struct LeadService<S, N> {
  store:    Arc<S>,
  notifier: Arc<N>,
  policy:   NotifyPolicy,
}

impl<S, N> LeadService<S, N>
where
  S: LeadStore,
  N: Notifier,
{
  pub fn new(store: Arc<S>, notifier: Arc<N>, policy: NotifyPolicy) -> Self {
    Self { store, notifier, policy }
  }

  pub fn policy(&self) -> NotifyPolicy { self.policy }

  /// Persist a new lead, then acknowledge the prospect and alert staff.
  pub async fn submit_lead(&self, input: NewLead) -> Result<Lead> {
    let lead = self
      .store
      .create(input)
      .await
      .map_err(|e| Error::Persistence(Box::new(e)))?;
    tracing::info!(lead = %lead.id, "lead recorded");

    let prospect = self
      .notifier
      .notify_prospect(&lead.email, &lead.first_name)
      .await;
    self.settle(lead.id, "prospect", prospect)?;

    let staff = self
      .notifier
      .notify_staff(&lead.email, &lead.first_name, &lead.last_name)
      .await;
    self.settle(lead.id, "staff", staff)?;

    Ok(lead)
  }

  /// Overwrite the state label of an existing lead. Never notifies.
  pub async fn change_state(
    &self,
    id: LeadId,
    new_state: impl Into<String>,
  ) -> Result<Lead> {
    let lead = self
      .store
      .update_state(id, new_state.into())
      .await
      .map_err(|e| {
        if e.is_not_found() {
          Error::LeadNotFound(id)
        } else {
          Error::Persistence(Box::new(e))
        }
      })?;
    tracing::info!(lead = %lead.id, state = %lead.state, "lead state changed");
    Ok(lead)
  }

  /// Offset/limit window over all leads in storage order.
  pub async fn list_leads(&self, skip: u64, limit: u64) -> Result<Vec<Lead>> {
    if limit == 0 {
      return Err(Error::Validation("limit must be at least 1".into()));
    }
    self
      .store
      .list(skip, limit)
      .await
      .map_err(|e| Error::Persistence(Box::new(e)))
  }

  pub async fn get_lead(&self, id: LeadId) -> Result<Lead> {
    self
      .store
      .get_by_id(id)
      .await
      .map_err(|e| Error::Persistence(Box::new(e)))?
      .ok_or(Error::LeadNotFound(id))
  }

  fn settle(
    &self,
    lead: LeadId,
    recipient: &'static str,
    outcome: Result<(), N::Error>,
  ) -> Result<()> {
    match (outcome, self.policy) {
      (Ok(()), _) => Ok(()),
      (Err(e), NotifyPolicy::Strict) => {
        Err(Error::Delivery { lead, source: Box::new(e) })
      }
      (Err(e), NotifyPolicy::BestEffort) => {
        tracing::warn!(%lead, recipient, error = %e, "notification failed, lead kept");
        Ok(())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use chrono::Utc;

  use super::*;
  use crate::lead::DEFAULT_STATE;

  // ── Test doubles ──────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  enum MemoryError {
    #[error("lead not found")]
    NotFound,
    #[error("storage offline")]
    Offline,
  }

  impl StoreError for MemoryError {
    fn is_not_found(&self) -> bool { matches!(self, Self::NotFound) }
  }

  #[derive(Default)]
  struct MemoryStore {
    leads:   Mutex<Vec<Lead>>,
    offline: bool,
  }

  impl LeadStore for MemoryStore {
    type Error = MemoryError;

    async fn create(&self, input: NewLead) -> Result<Lead, MemoryError> {
      if self.offline {
        return Err(MemoryError::Offline);
      }
      let mut leads = self.leads.lock().unwrap();
      let lead = Lead {
        id:         LeadId(leads.len() as i64 + 1),
        first_name: input.first_name().to_owned(),
        last_name:  input.last_name().to_owned(),
        email:      input.email().to_owned(),
        resume:     input.resume().to_owned(),
        state:      DEFAULT_STATE.to_owned(),
        created_at: Utc::now(),
      };
      leads.push(lead.clone());
      Ok(lead)
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Lead>, MemoryError> {
      let leads = self.leads.lock().unwrap();
      Ok(
        leads
          .iter()
          .skip(skip as usize)
          .take(limit as usize)
          .cloned()
          .collect(),
      )
    }

    async fn get_by_id(&self, id: LeadId) -> Result<Option<Lead>, MemoryError> {
      let leads = self.leads.lock().unwrap();
      Ok(leads.iter().find(|l| l.id == id).cloned())
    }

    async fn update_state(
      &self,
      id: LeadId,
      new_state: String,
    ) -> Result<Lead, MemoryError> {
      let mut leads = self.leads.lock().unwrap();
      let lead = leads
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or(MemoryError::NotFound)?;
      lead.state = new_state;
      Ok(lead.clone())
    }
  }

  #[derive(Debug, thiserror::Error)]
  #[error("transport refused message")]
  struct Refused;

  #[derive(Default)]
  struct RecordingNotifier {
    sent:          Mutex<Vec<String>>,
    fail_prospect: bool,
    fail_staff:    bool,
  }

  impl Notifier for RecordingNotifier {
    type Error = Refused;

    async fn notify_prospect(&self, email: &str, _: &str) -> Result<(), Refused> {
      self.sent.lock().unwrap().push(format!("prospect:{email}"));
      if self.fail_prospect { Err(Refused) } else { Ok(()) }
    }

    async fn notify_staff(
      &self,
      prospect_email: &str,
      _: &str,
      _: &str,
    ) -> Result<(), Refused> {
      self.sent.lock().unwrap().push(format!("staff:{prospect_email}"));
      if self.fail_staff { Err(Refused) } else { Ok(()) }
    }
  }

  fn alice() -> NewLead {
    NewLead::new("Alice", "Smith", "alice@example.com", "resume text").unwrap()
  }

  fn service(
    store: MemoryStore,
    notifier: RecordingNotifier,
    policy: NotifyPolicy,
  ) -> (LeadService<MemoryStore, RecordingNotifier>, Arc<MemoryStore>, Arc<RecordingNotifier>) {
    let store = Arc::new(store);
    let notifier = Arc::new(notifier);
    let svc = LeadService::new(store.clone(), notifier.clone(), policy);
    (svc, store, notifier)
  }

  // ── submit_lead ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_persists_then_notifies_both() {
    let (svc, store, notifier) =
      service(MemoryStore::default(), RecordingNotifier::default(), NotifyPolicy::Strict);

    let before = Utc::now();
    let lead = svc.submit_lead(alice()).await.unwrap();
    let after = Utc::now();

    assert_eq!(lead.state, DEFAULT_STATE);
    assert!(lead.created_at >= before && lead.created_at <= after);
    assert_eq!(store.leads.lock().unwrap().len(), 1);
    assert_eq!(
      *notifier.sent.lock().unwrap(),
      vec!["prospect:alice@example.com", "staff:alice@example.com"]
    );
  }

  #[tokio::test]
  async fn strict_policy_reports_failure_but_keeps_lead() {
    let notifier = RecordingNotifier { fail_prospect: true, ..Default::default() };
    let (svc, store, notifier) =
      service(MemoryStore::default(), notifier, NotifyPolicy::Strict);

    let err = svc.submit_lead(alice()).await.unwrap_err();
    assert!(matches!(err, Error::Delivery { lead: LeadId(1), .. }));
    assert_eq!(store.leads.lock().unwrap().len(), 1);
    // Staff alert is never attempted after the prospect send fails.
    assert_eq!(*notifier.sent.lock().unwrap(), vec!["prospect:alice@example.com"]);
  }

  #[tokio::test]
  async fn strict_policy_surfaces_staff_failure() {
    let notifier = RecordingNotifier { fail_staff: true, ..Default::default() };
    let (svc, store, _) = service(MemoryStore::default(), notifier, NotifyPolicy::Strict);

    let err = svc.submit_lead(alice()).await.unwrap_err();
    assert!(matches!(err, Error::Delivery { .. }));
    assert_eq!(store.leads.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn best_effort_policy_returns_lead_and_attempts_both() {
    let notifier = RecordingNotifier {
      fail_prospect: true,
      fail_staff: true,
      ..Default::default()
    };
    let (svc, _, notifier) =
      service(MemoryStore::default(), notifier, NotifyPolicy::BestEffort);

    let lead = svc.submit_lead(alice()).await.unwrap();
    assert_eq!(lead.id, LeadId(1));
    assert_eq!(notifier.sent.lock().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn persistence_failure_skips_notifications() {
    let store = MemoryStore { offline: true, ..Default::default() };
    let (svc, _, notifier) = service(store, RecordingNotifier::default(), NotifyPolicy::Strict);

    let err = svc.submit_lead(alice()).await.unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
    assert!(notifier.sent.lock().unwrap().is_empty());
  }

  // ── change_state ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn change_state_overwrites_only_state() {
    let (svc, _, notifier) =
      service(MemoryStore::default(), RecordingNotifier::default(), NotifyPolicy::Strict);
    let created = svc.submit_lead(alice()).await.unwrap();

    let updated = svc.change_state(created.id, "REVIEWED").await.unwrap();
    assert_eq!(updated, Lead { state: "REVIEWED".into(), ..created.clone() });

    let again = svc.change_state(created.id, "REVIEWED").await.unwrap();
    assert_eq!(again, updated);
    // Only the two creation messages were sent.
    assert_eq!(notifier.sent.lock().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn change_state_unknown_id_is_not_found() {
    let (svc, store, _) =
      service(MemoryStore::default(), RecordingNotifier::default(), NotifyPolicy::Strict);
    svc.submit_lead(alice()).await.unwrap();
    let snapshot = store.leads.lock().unwrap().clone();

    let err = svc.change_state(LeadId(99999), "REVIEWED").await.unwrap_err();
    assert!(matches!(err, Error::LeadNotFound(LeadId(99999))));
    assert_eq!(*store.leads.lock().unwrap(), snapshot);
  }

  // ── list_leads / get_lead ─────────────────────────────────────────────────

  #[tokio::test]
  async fn list_leads_rejects_zero_limit() {
    let (svc, _, _) =
      service(MemoryStore::default(), RecordingNotifier::default(), NotifyPolicy::Strict);
    assert!(matches!(svc.list_leads(0, 0).await, Err(Error::Validation(_))));
  }

  #[tokio::test]
  async fn get_lead_missing_is_not_found() {
    let (svc, _, _) =
      service(MemoryStore::default(), RecordingNotifier::default(), NotifyPolicy::Strict);
    assert!(matches!(svc.get_lead(LeadId(3)).await, Err(Error::LeadNotFound(LeadId(3)))));
  }

  #[test]
  fn notify_policy_deserialises_from_snake_case() {
    let p: NotifyPolicy = serde_json::from_str("\"best_effort\"").unwrap();
    assert_eq!(p, NotifyPolicy::BestEffort);
    assert_eq!(NotifyPolicy::default(), NotifyPolicy::Strict);
  }
}
