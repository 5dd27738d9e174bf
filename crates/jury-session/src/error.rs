//! Error types for jury-session.

use jury_auth::AuthError;
use thiserror::Error;

/// Errors reported by the backend collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused the request (validation, constraint, policy).
    #[error("{0}")]
    Rejected(String),

    /// The write did not complete within the configured bound.
    #[error("no answer from the backend within {after_secs}s")]
    Timeout { after_secs: u64 },

    /// A row from the backend failed validation.
    #[error("invalid {table} row: {reason}")]
    InvalidRow { table: &'static str, reason: String },
}

/// Errors from scoring session operations.
///
/// Every variant leaves the session usable; none is fatal.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The user may not open a scoring session.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// Contestants or existing votes could not be loaded.
    #[error("failed to load session data: {0}")]
    Load(StoreError),

    /// Submit was called on a session with no contestant in focus.
    #[error("no contestant in focus")]
    NoContestantInFocus,

    /// A vote submission is already outstanding for this session.
    #[error("a vote submission is already in flight")]
    SubmitInFlight,

    /// The ticket does not belong to the outstanding submission.
    #[error("submit ticket does not match the in-flight submission")]
    StaleTicket,

    /// The vote writer refused the vote; the error is passed through verbatim.
    #[error("{0}")]
    SubmitRejected(StoreError),
}
