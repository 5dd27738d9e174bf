use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One line of a juror's vote history: an existing vote joined with the
/// contestant's name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VoteHistoryItem {
    pub contestant_id: String,
    pub contestant_name: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}
