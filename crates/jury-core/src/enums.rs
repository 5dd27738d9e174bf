//! Criteria, statuses, and navigation enums for jury voting.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! matching the keys stored in the backend's `criteria_scores` JSON column.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// One of the four fixed scoring dimensions a juror rates.
///
/// The set is closed: every score draft carries exactly one value per
/// variant, and the composite score is their mean.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Technique,
    Creativity,
    StagePresence,
    Originality,
}

impl Criterion {
    /// All criteria in display order.
    pub const ALL: [Self; 4] = [
        Self::Technique,
        Self::Creativity,
        Self::StagePresence,
        Self::Originality,
    ];

    /// Stable key used in the stored criteria mapping.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Technique => "technique",
            Self::Creativity => "creativity",
            Self::StagePresence => "stage_presence",
            Self::Originality => "originality",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Technique => "Technique",
            Self::Creativity => "Creativity",
            Self::StagePresence => "Stage presence",
            Self::Originality => "Authenticity",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Technique => "Technical mastery of the talent",
            Self::Creativity => "Originality and innovation",
            Self::StagePresence => "Charisma and impact",
            Self::Originality => "Cultural identity",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Criterion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|criterion| criterion.key() == s)
            .ok_or_else(|| CoreError::UnknownCriterion(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ContestantStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a contestant. Only `active` contestants are scored.
///
/// Rows carrying a status this build does not know deserialize as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContestantStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Eliminated,
    #[serde(other)]
    Unknown,
}

impl ContestantStatus {
    /// Return the string representation used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Eliminated => "eliminated",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContestantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Cursor movement over the contestant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

// ---------------------------------------------------------------------------
// FocusState
// ---------------------------------------------------------------------------

/// Vote state of the focused contestant, from the current juror's view.
///
/// ```text
/// unvoted → voted
/// ```
///
/// `voted` is terminal: re-submitting overwrites the stored record but the
/// marker stays set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    Unvoted,
    Voted,
}

impl FocusState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unvoted => &[Self::Voted],
            Self::Voted => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }
}
