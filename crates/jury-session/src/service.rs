//! Session opening service.
//!
//! Runs the jury gate, loads contestants and the juror's existing votes, and
//! hands back a ready [`ScoringSession`] with its vote history.

use std::time::Duration;

use jury_auth::{JuryAuthenticator, authorize_juror};
use jury_config::JuryConfig;
use jury_core::entities::VoteHistoryItem;
use jury_core::enums::ContestantStatus;
use jury_core::identity::JurorIdentity;

use crate::controller::ScoringSession;
use crate::error::SessionError;
use crate::history::build_history;
use crate::ports::{ContestantSource, VoteSource};

/// Everything a freshly opened jury dashboard needs.
pub struct OpenedSession {
    pub juror: JurorIdentity,
    pub session: ScoringSession,
    pub history: Vec<VoteHistoryItem>,
}

/// Opens scoring sessions with the configured loading rules.
#[derive(Debug, Clone)]
pub struct JuryService {
    contestant_status: ContestantStatus,
    history_limit: usize,
    submit_timeout: Option<Duration>,
}

impl JuryService {
    #[must_use]
    pub fn new(config: &JuryConfig) -> Self {
        Self {
            contestant_status: config.session.contestant_status,
            history_limit: config.general.history_limit,
            submit_timeout: config.session.submit_timeout(),
        }
    }

    /// Authorize the current user and open their scoring session.
    ///
    /// Nothing is read from `store` unless the jury gate passes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unauthorized` if the gate refuses the user, or
    /// `SessionError::Load` if contestants or votes cannot be read.
    pub async fn open_session<A, S>(
        &self,
        auth: &A,
        store: &S,
    ) -> Result<OpenedSession, SessionError>
    where
        A: JuryAuthenticator + ?Sized,
        S: ContestantSource + VoteSource + ?Sized,
    {
        let juror = authorize_juror(auth).await?;

        let contestants = store
            .list_contestants(self.contestant_status)
            .await
            .map_err(SessionError::Load)?;
        let votes = store
            .list_votes_by_juror(&juror.jury_member_id)
            .await
            .map_err(SessionError::Load)?;

        let history = build_history(&votes, &contestants, self.history_limit);
        tracing::info!(
            juror = %juror.jury_member_id,
            contestants = contestants.len(),
            existing_votes = votes.len(),
            "jury session opened"
        );

        let session = ScoringSession::initialize(juror.clone(), contestants, &votes)
            .with_submit_timeout(self.submit_timeout);
        Ok(OpenedSession {
            juror,
            session,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use jury_auth::AuthError;
    use jury_core::identity::AuthUser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryBackend;

    fn user() -> AuthUser {
        AuthUser {
            id: "user_1".into(),
            email: Some("marie@jury.ht".into()),
        }
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_contestant_rows(vec![
                json!({"id": "c-2", "name": "Bertrand", "status": "active"}),
                json!({"id": "c-1", "name": "Anaïse", "status": "active"}),
                json!({"id": "c-9", "name": "Claude", "status": "eliminated"}),
            ])
            .unwrap()
    }

    #[tokio::test]
    async fn signed_out_user_gets_no_data_access() {
        let backend = backend();
        let service = JuryService::new(&JuryConfig::default());

        let err = service.open_session(&backend, &backend).await.err().unwrap();

        assert!(matches!(err, SessionError::Unauthorized(AuthError::NotAuthenticated)));
        assert_eq!(backend.data_reads(), 0);
    }

    #[tokio::test]
    async fn non_juror_is_signed_out_and_refused() {
        let backend = backend().with_signed_in(user());
        let service = JuryService::new(&JuryConfig::default());

        let err = service.open_session(&backend, &backend).await.err().unwrap();

        assert!(matches!(err, SessionError::Unauthorized(AuthError::NotJuryMember)));
        assert_eq!(backend.data_reads(), 0);
        assert_eq!(backend.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn juror_gets_sorted_active_contestants() {
        let backend = backend()
            .with_signed_in(user())
            .with_jury_member("user_1", "jm-1");
        let service = JuryService::new(&JuryConfig::default());

        let opened = service.open_session(&backend, &backend).await.unwrap();

        assert_eq!(opened.juror.display_name, "marie");
        let ids: Vec<&str> = opened
            .session
            .state()
            .contestants()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c-1", "c-2"]);
        assert!(opened.history.is_empty());
        assert_eq!(backend.data_reads(), 2);
    }

    #[tokio::test]
    async fn configured_status_selects_contestants() {
        let backend = backend()
            .with_signed_in(user())
            .with_jury_member("user_1", "jm-1");
        let mut config = JuryConfig::default();
        config.session.contestant_status = ContestantStatus::Eliminated;

        let opened = JuryService::new(&config)
            .open_session(&backend, &backend)
            .await
            .unwrap();

        assert_eq!(opened.session.state().contestants().len(), 1);
        assert_eq!(opened.session.state().contestants()[0].name, "Claude");
    }
}
