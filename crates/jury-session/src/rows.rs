//! Row-to-entity parsing at the backend boundary.
//!
//! The backend hands back loosely typed JSON rows (nullable columns, a
//! free-form `criteria_scores` object, timestamps in more than one format).
//! Nothing crosses into the session as raw JSON: every row is parsed into its
//! typed entity here or rejected with `StoreError::InvalidRow`.

use chrono::{DateTime, Utc};
use jury_core::entities::{Contestant, ExistingVote, JuryVoteRecord};
use jury_core::enums::ContestantStatus;
use jury_core::scoring::{CriteriaScores, MAX_SCORE};
use serde::Deserialize;
use serde_json::Value;

use crate::error::StoreError;

const CONTESTANTS: &str = "contestants";
const JURY_VOTES: &str = "jury_votes";

/// Parse a timestamp column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and the bare
/// `"2026-02-09 14:30:00"` form some backends emit.
///
/// # Errors
///
/// Returns `StoreError::InvalidRow` if the string matches neither format.
pub fn parse_datetime(table: &'static str, s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| invalid(table, format!("failed to parse datetime '{s}': {e}")))
}

/// Treat SQL NULL and the empty string alike.
fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

fn invalid(table: &'static str, reason: impl Into<String>) -> StoreError {
    StoreError::InvalidRow {
        table,
        reason: reason.into(),
    }
}

fn require_id(table: &'static str, field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(invalid(table, format!("empty {field}")));
    }
    Ok(())
}

fn check_composite(table: &'static str, score: f64) -> Result<f64, StoreError> {
    if !score.is_finite() || !(0.0..=f64::from(MAX_SCORE)).contains(&score) {
        return Err(invalid(table, format!("score {score} outside 0..={MAX_SCORE}")));
    }
    Ok(score)
}

/// A `contestants` row as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ContestantRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub talents: Option<Vec<String>>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<ContestantRow> for Contestant {
    type Error = StoreError;

    fn try_from(row: ContestantRow) -> Result<Self, Self::Error> {
        require_id(CONTESTANTS, "id", &row.id)?;
        require_id(CONTESTANTS, "name", &row.name)?;

        let status = match row.status.as_deref() {
            Some(s) => serde_json::from_value(Value::String(s.to_string()))
                .map_err(|e| invalid(CONTESTANTS, format!("status '{s}': {e}")))?,
            None => ContestantStatus::Unknown,
        };

        Ok(Self {
            id: row.id,
            name: row.name,
            category: non_empty(row.category),
            location: non_empty(row.location),
            bio: non_empty(row.bio),
            talents: row.talents.unwrap_or_default(),
            photo_url: non_empty(row.photo_url),
            status,
        })
    }
}

/// A full `jury_votes` row as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct JuryVoteRow {
    pub jury_member_id: String,
    pub contestant_id: String,
    pub score: f64,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub criteria_scores: Option<Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<JuryVoteRow> for JuryVoteRecord {
    type Error = StoreError;

    fn try_from(row: JuryVoteRow) -> Result<Self, Self::Error> {
        require_id(JURY_VOTES, "jury_member_id", &row.jury_member_id)?;
        require_id(JURY_VOTES, "contestant_id", &row.contestant_id)?;

        let criteria_scores = match &row.criteria_scores {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                CriteriaScores::from_json(value).map_err(|e| invalid(JURY_VOTES, e.to_string()))?,
            ),
        };

        Ok(Self {
            score: check_composite(JURY_VOTES, row.score)?,
            criteria_scores,
            comment: non_empty(row.comments),
            created_at: parse_datetime(JURY_VOTES, &row.created_at)?,
            updated_at: parse_datetime(JURY_VOTES, &row.updated_at)?,
            jury_member_id: row.jury_member_id,
            contestant_id: row.contestant_id,
        })
    }
}

/// The `contestant_id, score, created_at` projection read when a session opens.
#[derive(Debug, Clone, Deserialize)]
pub struct ExistingVoteRow {
    pub contestant_id: String,
    #[serde(default)]
    pub score: Option<f64>,
    pub created_at: String,
}

impl TryFrom<ExistingVoteRow> for ExistingVote {
    type Error = StoreError;

    fn try_from(row: ExistingVoteRow) -> Result<Self, Self::Error> {
        require_id(JURY_VOTES, "contestant_id", &row.contestant_id)?;
        Ok(Self {
            score: check_composite(JURY_VOTES, row.score.unwrap_or(0.0))?,
            created_at: parse_datetime(JURY_VOTES, &row.created_at)?,
            contestant_id: row.contestant_id,
        })
    }
}

fn parse_rows<R, T>(table: &'static str, rows: Vec<Value>) -> Result<Vec<T>, StoreError>
where
    R: for<'de> Deserialize<'de>,
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter()
        .map(|value| {
            let row: R = serde_json::from_value(value).map_err(|e| invalid(table, e.to_string()))?;
            T::try_from(row)
        })
        .collect()
}

/// Parse raw `contestants` rows.
///
/// # Errors
///
/// Returns `StoreError::InvalidRow` for the first row that fails to parse.
pub fn parse_contestants(rows: Vec<Value>) -> Result<Vec<Contestant>, StoreError> {
    parse_rows::<ContestantRow, _>(CONTESTANTS, rows)
}

/// Parse raw `jury_votes` rows.
///
/// # Errors
///
/// Returns `StoreError::InvalidRow` for the first row that fails to parse.
pub fn parse_jury_votes(rows: Vec<Value>) -> Result<Vec<JuryVoteRecord>, StoreError> {
    parse_rows::<JuryVoteRow, _>(JURY_VOTES, rows)
}

/// Parse raw `jury_votes` projections.
///
/// # Errors
///
/// Returns `StoreError::InvalidRow` for the first row that fails to parse.
pub fn parse_existing_votes(rows: Vec<Value>) -> Result<Vec<ExistingVote>, StoreError> {
    parse_rows::<ExistingVoteRow, _>(JURY_VOTES, rows)
}
