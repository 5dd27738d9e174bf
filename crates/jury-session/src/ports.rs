//! Backend collaborator ports.
//!
//! The managed backend owns durability, query execution, and access control.
//! The session layer only sees these traits; implementations live with the
//! transport (or in [`crate::memory`] for local use).

use async_trait::async_trait;
use jury_core::entities::{Contestant, ExistingVote, VoteUpsert};
use jury_core::enums::ContestantStatus;

use crate::error::StoreError;

/// Read access to contestants.
#[async_trait]
pub trait ContestantSource: Send + Sync {
    /// Contestants with `status`, sorted by name (stable).
    async fn list_contestants(
        &self,
        status: ContestantStatus,
    ) -> Result<Vec<Contestant>, StoreError>;

    async fn list_active_contestants(&self) -> Result<Vec<Contestant>, StoreError> {
        self.list_contestants(ContestantStatus::Active).await
    }
}

/// Read access to a juror's existing votes.
#[async_trait]
pub trait VoteSource: Send + Sync {
    async fn list_votes_by_juror(
        &self,
        jury_member_id: &str,
    ) -> Result<Vec<ExistingVote>, StoreError>;
}

/// Write access for jury votes.
///
/// Implementations must upsert on `(jury_member_id, contestant_id)`: calling
/// twice with the same key overwrites, never duplicates.
#[async_trait]
pub trait VoteWriter: Send + Sync {
    async fn upsert_vote(&self, vote: &VoteUpsert) -> Result<(), StoreError>;
}
