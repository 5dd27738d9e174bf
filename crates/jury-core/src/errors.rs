//! Cross-cutting error types for jury voting.
//!
//! Errors raised by the scoring types themselves. Collaborator errors
//! (`AuthError`, `StoreError`) and session errors are defined in their
//! respective crates.

use thiserror::Error;

/// Errors that can be raised by the core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A criterion key outside the fixed set was supplied.
    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),

    /// Data failed validation (range, format, missing field).
    #[error("Validation error: {0}")]
    Validation(String),
}
