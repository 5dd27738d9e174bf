use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scoring::CriteriaScores;

/// A persisted jury vote. At most one exists per `(jury_member_id, contestant_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct JuryVoteRecord {
    pub jury_member_id: String,
    pub contestant_id: String,
    /// Composite score, one decimal place.
    pub score: f64,
    pub criteria_scores: Option<CriteriaScores>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a stored vote read back when a session opens.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExistingVote {
    pub contestant_id: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Write request produced by a submitted draft.
///
/// The vote writer inserts it or overwrites the record sharing the same
/// `(jury_member_id, contestant_id)` key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VoteUpsert {
    pub jury_member_id: String,
    pub contestant_id: String,
    pub score: f64,
    pub criteria_scores: CriteriaScores,
    pub comment: String,
    pub updated_at: DateTime<Utc>,
}

impl VoteUpsert {
    /// The uniqueness key of the record this request writes.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.jury_member_id, &self.contestant_id)
    }

    /// Materialize the stored record, keeping `created_at` from a prior record
    /// when one exists.
    #[must_use]
    pub fn into_record(self, created_at: Option<DateTime<Utc>>) -> JuryVoteRecord {
        JuryVoteRecord {
            created_at: created_at.unwrap_or(self.updated_at),
            jury_member_id: self.jury_member_id,
            contestant_id: self.contestant_id,
            score: self.score,
            criteria_scores: Some(self.criteria_scores),
            comment: Some(self.comment),
            updated_at: self.updated_at,
        }
    }
}

impl From<&JuryVoteRecord> for ExistingVote {
    fn from(record: &JuryVoteRecord) -> Self {
        Self {
            contestant_id: record.contestant_id.clone(),
            score: record.score,
            created_at: record.created_at,
        }
    }
}
