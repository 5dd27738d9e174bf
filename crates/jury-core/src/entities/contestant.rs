use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ContestantStatus;

/// A contestant as seen by a juror. Read-only for the length of a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Contestant {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    /// Talent tags in display order.
    pub talents: Vec<String>,
    pub photo_url: Option<String>,
    pub status: ContestantStatus,
}
