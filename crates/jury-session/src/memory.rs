//! In-memory backend.
//!
//! Implements every collaborator port against process memory so the scoring
//! workflow can run without the managed service: in tests, and for embedders
//! that want a local stand-in. Nothing is persisted.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jury_auth::{AuthError, Credentials, JuryAuthenticator};
use jury_core::entities::{Contestant, ExistingVote, JuryVoteRecord, VoteUpsert};
use jury_core::enums::ContestantStatus;
use jury_core::identity::AuthUser;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::ports::{ContestantSource, VoteSource, VoteWriter};
use crate::rows::parse_contestants;

#[derive(Default)]
struct Inner {
    current_user: Option<AuthUser>,
    /// Keyed by normalised e-mail.
    accounts: HashMap<String, (String, AuthUser)>,
    /// `user_id` -> `jury_member_id`.
    jurors: HashMap<String, String>,
    contestants: Vec<Contestant>,
    votes: BTreeMap<(String, String), JuryVoteRecord>,
    write_failure: Option<String>,
}

/// Local stand-in for the managed backend.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
    write_calls: AtomicUsize,
    data_reads: AtomicUsize,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that can sign in with `email` and `password`.
    #[must_use]
    pub fn with_account(mut self, user_id: &str, email: &str, password: &str) -> Self {
        let email = email.trim().to_lowercase();
        let user = AuthUser {
            id: user_id.to_string(),
            email: Some(email.clone()),
        };
        self.inner
            .get_mut()
            .accounts
            .insert(email, (password.to_string(), user));
        self
    }

    /// Start with `user` already signed in.
    #[must_use]
    pub fn with_signed_in(mut self, user: AuthUser) -> Self {
        self.inner.get_mut().current_user = Some(user);
        self
    }

    /// Put `user_id` on the jury as `jury_member_id`.
    #[must_use]
    pub fn with_jury_member(mut self, user_id: &str, jury_member_id: &str) -> Self {
        self.inner
            .get_mut()
            .jurors
            .insert(user_id.to_string(), jury_member_id.to_string());
        self
    }

    #[must_use]
    pub fn with_contestants(mut self, contestants: Vec<Contestant>) -> Self {
        self.inner.get_mut().contestants.extend(contestants);
        self
    }

    /// Load contestants from raw backend rows.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRow` if any row fails to parse.
    pub fn with_contestant_rows(self, rows: Vec<Value>) -> Result<Self, StoreError> {
        Ok(self.with_contestants(parse_contestants(rows)?))
    }

    /// Seed a stored vote.
    #[must_use]
    pub fn with_vote(mut self, record: JuryVoteRecord) -> Self {
        let key = (record.jury_member_id.clone(), record.contestant_id.clone());
        self.inner.get_mut().votes.insert(key, record);
        self
    }

    /// Make every following write fail with `StoreError::Rejected(message)`,
    /// or succeed again with `None`.
    pub async fn set_write_failure(&self, message: Option<&str>) {
        self.inner.lock().await.write_failure = message.map(ToString::to_string);
    }

    /// Number of `upsert_vote` calls, failed ones included.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Number of contestant and vote reads.
    #[must_use]
    pub fn data_reads(&self) -> usize {
        self.data_reads.load(Ordering::SeqCst)
    }

    /// The stored record for `(jury_member_id, contestant_id)`.
    pub async fn vote(&self, jury_member_id: &str, contestant_id: &str) -> Option<JuryVoteRecord> {
        let key = (jury_member_id.to_string(), contestant_id.to_string());
        self.inner.lock().await.votes.get(&key).cloned()
    }

    /// Number of stored vote records across all jurors.
    pub async fn vote_count(&self) -> usize {
        self.inner.lock().await.votes.len()
    }
}

#[async_trait]
impl JuryAuthenticator for MemoryBackend {
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.inner.lock().await.current_user.clone())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        let mut inner = self.inner.lock().await;
        let user = match inner.accounts.get(credentials.email()) {
            Some((password, user)) if password == credentials.password() => user.clone(),
            _ => return Err(AuthError::InvalidCredentials("invalid login credentials".into())),
        };
        inner.current_user = Some(user.clone());
        Ok(user)
    }

    async fn jury_member_id(&self, user_id: &str) -> Result<Option<String>, AuthError> {
        Ok(self.inner.lock().await.jurors.get(user_id).cloned())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.inner.lock().await.current_user = None;
        Ok(())
    }
}

#[async_trait]
impl ContestantSource for MemoryBackend {
    async fn list_contestants(
        &self,
        status: ContestantStatus,
    ) -> Result<Vec<Contestant>, StoreError> {
        self.data_reads.fetch_add(1, Ordering::SeqCst);
        let mut contestants: Vec<Contestant> = self
            .inner
            .lock()
            .await
            .contestants
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect();
        contestants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(contestants)
    }
}

#[async_trait]
impl VoteSource for MemoryBackend {
    async fn list_votes_by_juror(
        &self,
        jury_member_id: &str,
    ) -> Result<Vec<ExistingVote>, StoreError> {
        self.data_reads.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().await;
        let mut votes: Vec<ExistingVote> = inner
            .votes
            .values()
            .filter(|record| record.jury_member_id == jury_member_id)
            .map(ExistingVote::from)
            .collect();
        votes.sort_by_key(|vote| vote.created_at);
        Ok(votes)
    }
}

#[async_trait]
impl VoteWriter for MemoryBackend {
    async fn upsert_vote(&self, vote: &VoteUpsert) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().await;
        if let Some(message) = &inner.write_failure {
            return Err(StoreError::Rejected(message.clone()));
        }

        let (jury_member_id, contestant_id) = vote.key();
        let key = (jury_member_id.to_string(), contestant_id.to_string());
        let created_at = inner.votes.get(&key).map(|record| record.created_at);
        inner.votes.insert(key, vote.clone().into_record(created_at));
        tracing::debug!(
            juror = %vote.jury_member_id,
            contestant = %vote.contestant_id,
            overwrite = created_at.is_some(),
            "memory backend: vote upserted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use jury_core::scoring::CriteriaScores;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn upsert(score: f64, comment: &str) -> VoteUpsert {
        VoteUpsert {
            jury_member_id: "jm-1".into(),
            contestant_id: "c-1".into(),
            score,
            criteria_scores: CriteriaScores::default(),
            comment: comment.into(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_overwrites_and_keeps_creation_time() {
        let backend = MemoryBackend::new();
        backend.upsert_vote(&upsert(5.0, "first")).await.unwrap();
        let created = backend.vote("jm-1", "c-1").await.unwrap().created_at;

        let mut second = upsert(8.3, "second");
        second.updated_at = Utc::now() + TimeDelta::seconds(5);
        backend.upsert_vote(&second).await.unwrap();

        let record = backend.vote("jm-1", "c-1").await.unwrap();
        assert_eq!(backend.vote_count().await, 1);
        assert_eq!(record.created_at, created);
        assert_eq!(record.comment.as_deref(), Some("second"));
        assert!((record.score - 8.3).abs() < f64::EPSILON);
        assert_eq!(backend.write_calls(), 2);
    }

    #[tokio::test]
    async fn injected_failure_is_counted_and_stores_nothing() {
        let backend = MemoryBackend::new();
        backend.set_write_failure(Some("network down")).await;

        let err = backend.upsert_vote(&upsert(5.0, "")).await.unwrap_err();
        assert_eq!(err.to_string(), "network down");
        assert_eq!(backend.write_calls(), 1);
        assert_eq!(backend.vote_count().await, 0);

        backend.set_write_failure(None).await;
        backend.upsert_vote(&upsert(5.0, "")).await.unwrap();
        assert_eq!(backend.vote_count().await, 1);
    }

    #[tokio::test]
    async fn contestants_are_filtered_and_sorted_by_name() {
        let backend = MemoryBackend::new()
            .with_contestant_rows(vec![
                json!({"id": "c-3", "name": "Zaza", "status": "active"}),
                json!({"id": "c-1", "name": "Bertrand", "status": "pending"}),
                json!({"id": "c-2", "name": "Anaïse", "status": "active"}),
            ])
            .unwrap();

        let active = backend.list_active_contestants().await.unwrap();
        let ids: Vec<&str> = active.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c-2", "c-3"]);
        assert_eq!(backend.data_reads(), 1);
    }

    #[tokio::test]
    async fn sign_in_normalises_email_and_checks_password() {
        let backend = MemoryBackend::new().with_account("user_1", "Marie@Jury.ht", "s3cret");

        let wrong = Credentials::new("marie@jury.ht", "nope").unwrap();
        assert!(matches!(
            backend.sign_in(&wrong).await,
            Err(AuthError::InvalidCredentials(_))
        ));
        assert_eq!(backend.current_user().await.unwrap(), None);

        let right = Credentials::new(" MARIE@jury.ht ", "s3cret").unwrap();
        let user = backend.sign_in(&right).await.unwrap();
        assert_eq!(user.id, "user_1");
        assert_eq!(backend.current_user().await.unwrap(), Some(user));

        backend.sign_out().await.unwrap();
        assert_eq!(backend.current_user().await.unwrap(), None);
    }
}
