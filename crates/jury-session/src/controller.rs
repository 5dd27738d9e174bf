//! Scoring session controller.
//!
//! Wraps [`SessionState`] with the juror identity, the single in-flight
//! submit guard, and a state-changed notification channel.
//!
//! Submission is two-phase so the state is not borrowed while the write is
//! outstanding:
//!
//! ```text
//! begin_submit ──► VoteWriter::upsert_vote ──► finish_submit
//!   (flag up)                                   (flag down; apply or keep)
//! ```
//!
//! [`ScoringSession::submit`] runs all three in order for callers that don't
//! need to interleave. A ticket that will never be finished goes back through
//! [`ScoringSession::abandon_submit`].

use std::time::Duration;

use chrono::Utc;
use jury_core::entities::{Contestant, ExistingVote, VoteUpsert};
use jury_core::enums::{Criterion, Direction, FocusState};
use jury_core::identity::JurorIdentity;
use jury_core::responses::{Position, ProgressStats};
use jury_core::scoring::ScoreDraft;
use serde::Serialize;
use tokio::sync::watch;

use crate::error::{SessionError, StoreError};
use crate::ports::VoteWriter;
use crate::state::SessionState;

/// What observers see after each state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub cursor: Option<usize>,
    pub position: Option<Position>,
    pub draft: Option<ScoreDraft>,
    pub composite: Option<f64>,
    pub has_voted_current: bool,
    pub stats: ProgressStats,
    pub submitting: bool,
}

/// Proof of an outstanding submission.
///
/// Returned by [`ScoringSession::begin_submit`] and consumed by
/// [`ScoringSession::finish_submit`] or [`ScoringSession::abandon_submit`].
#[derive(Debug)]
#[must_use = "an unfinished ticket keeps the session in the submitting state"]
pub struct SubmitTicket {
    seq: u64,
    index: usize,
    request: VoteUpsert,
}

impl SubmitTicket {
    /// The upsert to hand to the vote writer.
    #[must_use]
    pub const fn request(&self) -> &VoteUpsert {
        &self.request
    }
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitReceipt {
    pub contestant_id: String,
    pub score: f64,
    /// Whether focus moved on to the next contestant.
    pub advanced: bool,
}

/// Lowers the in-flight flag when a `submit` future is dropped mid-write.
///
/// After `finish_submit` has run the flag no longer carries `seq`, so the
/// drop is a no-op.
struct ReleaseOnDrop<'a> {
    session: &'a mut ScoringSession,
    seq: u64,
}

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.session.release(self.seq);
    }
}

/// The scoring workflow for one authenticated juror.
pub struct ScoringSession {
    juror: JurorIdentity,
    state: SessionState,
    in_flight: Option<u64>,
    next_seq: u64,
    submit_timeout: Option<Duration>,
    notifier: watch::Sender<SessionSnapshot>,
}

impl ScoringSession {
    /// Start a session over `contestants` (already sorted by name).
    ///
    /// An empty list yields a usable session with no draft.
    #[must_use]
    pub fn initialize(
        juror: JurorIdentity,
        contestants: Vec<Contestant>,
        existing_votes: &[ExistingVote],
    ) -> Self {
        let state = SessionState::new(contestants, existing_votes);
        let (notifier, _) = watch::channel(Self::snapshot_of(&state, false));
        tracing::debug!(
            juror = %juror.jury_member_id,
            contestants = state.contestants().len(),
            voted = state.voted().len(),
            "scoring session initialized"
        );
        Self {
            juror,
            state,
            in_flight: None,
            next_seq: 0,
            submit_timeout: None,
            notifier,
        }
    }

    /// Bound each write issued by [`Self::submit`]. `None` leaves timing to
    /// the vote writer.
    #[must_use]
    pub const fn with_submit_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.submit_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn juror(&self) -> &JurorIdentity {
        &self.juror
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Receive a fresh [`SessionSnapshot`] after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.notifier.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        Self::snapshot_of(&self.state, self.is_submitting())
    }

    /// Set one criterion on the draft. Out-of-range values are clamped.
    ///
    /// Returns the stored value, or `None` for an empty session.
    pub fn set_criterion_score(&mut self, criterion: Criterion, value: i64) -> Option<u8> {
        let stored = self.state.set_criterion_score(criterion, value);
        if stored.is_some() {
            self.publish();
        }
        stored
    }

    /// Set the draft comment, truncated to its first 1000 characters.
    pub fn set_comment(&mut self, text: &str) {
        if self.state.set_comment(text) {
            self.publish();
        }
    }

    /// Composite score of the current draft.
    #[must_use]
    pub fn composite_score(&self) -> Option<f64> {
        self.state.draft().map(ScoreDraft::composite)
    }

    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        self.state.progress_ratio()
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        self.state.stats()
    }

    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.state.position()
    }

    /// Whether the focused contestant already has a stored vote.
    #[must_use]
    pub fn has_voted_current(&self) -> bool {
        self.state.focus_state() == Some(FocusState::Voted)
    }

    /// Move focus one step; a no-op at either end of the list.
    ///
    /// A move discards unsaved draft edits.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let moved = self.state.navigate(direction);
        if moved {
            tracing::debug!(?direction, cursor = ?self.state.cursor(), "focus moved, draft reset");
            self.publish();
        }
        moved
    }

    /// Raise the in-flight flag and build the upsert for the focused draft.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitInFlight` while another ticket is
    /// outstanding, or `SessionError::NoContestantInFocus` for an empty
    /// session. Neither changes any state.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SessionError> {
        if self.in_flight.is_some() {
            tracing::warn!(
                juror = %self.juror.jury_member_id,
                "submit rejected: already in flight"
            );
            return Err(SessionError::SubmitInFlight);
        }
        let (Some(index), Some(draft)) = (self.state.cursor(), self.state.draft()) else {
            return Err(SessionError::NoContestantInFocus);
        };

        let request = VoteUpsert {
            jury_member_id: self.juror.jury_member_id.clone(),
            contestant_id: draft.contestant_id.clone(),
            score: draft.composite(),
            criteria_scores: draft.scores,
            comment: draft.comment.clone(),
            updated_at: Utc::now(),
        };

        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight = Some(seq);
        self.publish();
        Ok(SubmitTicket {
            seq,
            index,
            request,
        })
    }

    /// Lower the in-flight flag and apply the writer's verdict.
    ///
    /// On success the contestant joins the voted-set and, if it is still
    /// focused and not last, focus advances with a fresh draft. On failure
    /// cursor, draft, and voted-set are left exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleTicket` if `ticket` is not the outstanding
    /// one, or `SessionError::SubmitRejected` carrying the writer's error.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<(), StoreError>,
    ) -> Result<SubmitReceipt, SessionError> {
        if self.in_flight != Some(ticket.seq) {
            return Err(SessionError::StaleTicket);
        }
        self.in_flight = None;

        let result = match outcome {
            Ok(()) => {
                let SubmitTicket { index, request, .. } = ticket;
                let advanced = self.state.apply_accepted(&request.contestant_id, index);
                tracing::info!(
                    juror = %request.jury_member_id,
                    contestant = %request.contestant_id,
                    score = request.score,
                    advanced,
                    "jury vote recorded"
                );
                Ok(SubmitReceipt {
                    contestant_id: request.contestant_id,
                    score: request.score,
                    advanced,
                })
            }
            Err(error) => {
                tracing::warn!(
                    juror = %ticket.request.jury_member_id,
                    contestant = %ticket.request.contestant_id,
                    %error,
                    "jury vote rejected"
                );
                Err(SessionError::SubmitRejected(error))
            }
        };
        self.publish();
        result
    }

    /// Give up on an outstanding submission without applying any outcome.
    ///
    /// Lowers the in-flight flag so the draft can be submitted again. Cursor,
    /// draft, and voted-set are untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleTicket` if `ticket` is not the outstanding
    /// one.
    pub fn abandon_submit(&mut self, ticket: SubmitTicket) -> Result<(), SessionError> {
        if self.release(ticket.seq) {
            Ok(())
        } else {
            Err(SessionError::StaleTicket)
        }
    }

    /// Submit the focused draft through `writer` and wait for its verdict.
    ///
    /// If the returned future is dropped before the writer answers, the
    /// in-flight flag is lowered and state is left as it was before the call.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_submit`] and [`Self::finish_submit`]. A configured
    /// timeout that elapses is reported as `SubmitRejected(StoreError::Timeout)`.
    pub async fn submit<W>(&mut self, writer: &W) -> Result<SubmitReceipt, SessionError>
    where
        W: VoteWriter + ?Sized,
    {
        let limit = self.submit_timeout;
        let ticket = self.begin_submit()?;
        let mut guard = ReleaseOnDrop {
            session: self,
            seq: ticket.seq,
        };
        let outcome = match limit {
            Some(limit) => tokio::time::timeout(limit, writer.upsert_vote(ticket.request()))
                .await
                .unwrap_or(Err(StoreError::Timeout {
                    after_secs: limit.as_secs(),
                })),
            None => writer.upsert_vote(ticket.request()).await,
        };
        guard.session.finish_submit(ticket, outcome)
    }

    /// Lower the flag if `seq` is still the outstanding submission.
    fn release(&mut self, seq: u64) -> bool {
        if self.in_flight != Some(seq) {
            return false;
        }
        self.in_flight = None;
        tracing::warn!(juror = %self.juror.jury_member_id, "vote submission abandoned");
        self.publish();
        true
    }

    fn publish(&self) {
        self.notifier.send_replace(self.snapshot());
    }

    fn snapshot_of(state: &SessionState, submitting: bool) -> SessionSnapshot {
        SessionSnapshot {
            cursor: state.cursor(),
            position: state.position(),
            draft: state.draft().cloned(),
            composite: state.draft().map(ScoreDraft::composite),
            has_voted_current: state.focus_state() == Some(FocusState::Voted),
            stats: state.stats(),
            submitting,
        }
    }
}
