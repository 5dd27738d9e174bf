//! End-to-end scoring flow against the in-memory backend.

use chrono::{TimeDelta, Utc};
use jury_auth::{AuthError, JuryAuthenticator};
use jury_config::JuryConfig;
use jury_core::entities::JuryVoteRecord;
use jury_core::enums::{Criterion, Direction};
use jury_core::identity::AuthUser;
use jury_core::scoring::{CriteriaScores, ScoreDraft};
use jury_session::{JuryService, MemoryBackend, SessionError, StoreError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn seeded_backend() -> MemoryBackend {
    MemoryBackend::new()
        .with_account("user_1", "marie@jury.ht", "s3cret")
        .with_jury_member("user_1", "jm-1")
        .with_contestant_rows(vec![
            json!({"id": "c-3", "name": "Carline", "status": "active", "talents": ["dance"]}),
            json!({"id": "c-1", "name": "Anaïse", "status": "active", "talents": ["vocals"]}),
            json!({"id": "c-2", "name": "Bertrand", "status": "active", "talents": null}),
        ])
        .unwrap()
}

fn prior_vote(contestant_id: &str, score: f64) -> JuryVoteRecord {
    let at = Utc::now() - TimeDelta::days(1);
    JuryVoteRecord {
        jury_member_id: "jm-1".into(),
        contestant_id: contestant_id.into(),
        score,
        criteria_scores: Some(CriteriaScores::uniform(6)),
        comment: None,
        created_at: at,
        updated_at: at,
    }
}

async fn sign_in(backend: &MemoryBackend) {
    jury_auth::login(backend, "Marie@Jury.ht", "s3cret").await.unwrap();
}

#[tokio::test]
async fn full_round_scores_every_contestant() {
    let backend = seeded_backend();
    sign_in(&backend).await;
    let service = JuryService::new(&JuryConfig::default());
    let mut opened = service.open_session(&backend, &backend).await.unwrap();
    let session = &mut opened.session;

    let rounds = [(7, 8, 6, 9, 7.5), (7, 7, 7, 6, 6.8), (10, 10, 10, 10, 10.0)];
    for (i, (t, c, s, o, expected)) in rounds.into_iter().enumerate() {
        session.set_criterion_score(Criterion::Technique, t);
        session.set_criterion_score(Criterion::Creativity, c);
        session.set_criterion_score(Criterion::StagePresence, s);
        session.set_criterion_score(Criterion::Originality, o);
        assert_eq!(session.composite_score(), Some(expected));

        let receipt = session.submit(&backend).await.unwrap();
        assert_eq!(receipt.advanced, i < 2);
    }

    assert!((session.progress_ratio() - 1.0).abs() < f64::EPSILON);
    assert_eq!(session.state().cursor(), Some(2));
    assert_eq!(backend.vote_count().await, 3);

    let stored = backend.vote("jm-1", "c-2").await.unwrap();
    assert!((stored.score - 6.8).abs() < f64::EPSILON);
    assert_eq!(
        stored.criteria_scores,
        Some(CriteriaScores {
            technique: 7,
            creativity: 7,
            stage_presence: 7,
            originality: 6,
        })
    );
}

#[tokio::test]
async fn existing_votes_seed_progress_and_history() {
    let backend = seeded_backend()
        .with_vote(prior_vote("c-2", 8.3))
        .with_vote(prior_vote("retired", 4.0));
    sign_in(&backend).await;

    let opened = JuryService::new(&JuryConfig::default())
        .open_session(&backend, &backend)
        .await
        .unwrap();

    let stats = opened.session.state().stats();
    assert_eq!((stats.voted, stats.remaining, stats.total), (1, 2, 3));
    assert_eq!(stats.percent, 33);
    assert_eq!(opened.history.len(), 1);
    assert_eq!(opened.history[0].contestant_name, "Bertrand");
    assert!((opened.history[0].score - 8.3).abs() < f64::EPSILON);
}

#[tokio::test]
async fn revote_overwrites_and_starts_from_defaults() {
    let backend = seeded_backend().with_vote(prior_vote("c-1", 6.0));
    sign_in(&backend).await;
    let mut opened = JuryService::new(&JuryConfig::default())
        .open_session(&backend, &backend)
        .await
        .unwrap();
    let session = &mut opened.session;

    assert!(session.snapshot().has_voted_current);
    assert_eq!(session.state().draft(), Some(&ScoreDraft::fresh("c-1")));

    session.set_criterion_score(Criterion::Technique, 42);
    session.set_comment(&"é".repeat(1200));
    session.submit(&backend).await.unwrap();

    let stored = backend.vote("jm-1", "c-1").await.unwrap();
    assert_eq!(backend.vote_count().await, 1);
    assert_eq!(stored.criteria_scores.map(|c| c.technique), Some(10));
    assert_eq!(stored.comment.map(|c| c.chars().count()), Some(1000));
    assert!(stored.created_at < stored.updated_at);
    assert_eq!(session.state().stats().voted, 1);
}

#[tokio::test]
async fn rejected_write_can_be_retried() {
    let backend = seeded_backend();
    sign_in(&backend).await;
    let mut opened = JuryService::new(&JuryConfig::default())
        .open_session(&backend, &backend)
        .await
        .unwrap();
    let session = &mut opened.session;
    session.navigate(Direction::Next);
    session.set_criterion_score(Criterion::Creativity, 9);
    let before = session.state().clone();

    backend
        .set_write_failure(Some("new row violates row-level security policy"))
        .await;
    let err = session.submit(&backend).await.unwrap_err();
    assert!(matches!(err, SessionError::SubmitRejected(StoreError::Rejected(_))));
    assert_eq!(session.state(), &before);

    backend.set_write_failure(None).await;
    let receipt = session.submit(&backend).await.unwrap();
    assert_eq!(receipt.contestant_id, "c-2");
    assert_eq!(backend.write_calls(), 2);
    assert_eq!(backend.vote_count().await, 1);
}

#[tokio::test]
async fn login_refuses_non_juror() {
    let backend = MemoryBackend::new().with_account("user_2", "guest@mail.ht", "pw");

    let err = jury_auth::login(&backend, "guest@mail.ht", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::NotJuryMember));
    assert_eq!(backend.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn empty_lineup_opens_an_empty_session() {
    let backend = MemoryBackend::new()
        .with_signed_in(AuthUser {
            id: "user_1".into(),
            email: None,
        })
        .with_jury_member("user_1", "jm-1");

    let mut opened = JuryService::new(&JuryConfig::default())
        .open_session(&backend, &backend)
        .await
        .unwrap();

    assert_eq!(opened.juror.display_name, "Jury member");
    assert!(opened.session.state().draft().is_none());
    assert!(opened.session.progress_ratio().abs() < f64::EPSILON);
    assert!(matches!(
        opened.session.submit(&backend).await,
        Err(SessionError::NoContestantInFocus)
    ));
    assert_eq!(backend.write_calls(), 0);
}
