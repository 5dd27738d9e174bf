//! Criterion scores, score drafts, and composite score derivation.
//!
//! A draft holds one integer per [`Criterion`] in `MIN_SCORE..=MAX_SCORE` and a
//! bounded comment. The composite score is never set directly: it is always
//! the mean of the four criterion scores, rounded half-up to one decimal.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Criterion;
use crate::errors::CoreError;

/// Lowest score a criterion can hold.
pub const MIN_SCORE: u8 = 1;
/// Highest score a criterion can hold.
pub const MAX_SCORE: u8 = 10;
/// Score every criterion starts at in a fresh draft.
pub const DEFAULT_SCORE: u8 = 5;
/// Maximum comment length, in characters.
pub const COMMENT_MAX_CHARS: usize = 1000;

/// Clamp an arbitrary integer into the criterion score domain.
#[must_use]
pub fn clamp_score(value: i64) -> u8 {
    // The clamp bounds fit in u8, so the narrowing cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = value.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8;
    clamped
}

/// Keep the first [`COMMENT_MAX_CHARS`] characters of `text`.
///
/// Truncating an already-truncated string returns it unchanged.
#[must_use]
pub fn truncate_comment(text: &str) -> String {
    match text.char_indices().nth(COMMENT_MAX_CHARS) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Per-criterion scores, keyed the way the backend stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CriteriaScores {
    pub technique: u8,
    pub creativity: u8,
    pub stage_presence: u8,
    pub originality: u8,
}

impl Default for CriteriaScores {
    fn default() -> Self {
        Self::uniform(DEFAULT_SCORE)
    }
}

impl CriteriaScores {
    #[must_use]
    pub const fn uniform(value: u8) -> Self {
        Self {
            technique: value,
            creativity: value,
            stage_presence: value,
            originality: value,
        }
    }

    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Technique => self.technique,
            Criterion::Creativity => self.creativity,
            Criterion::StagePresence => self.stage_presence,
            Criterion::Originality => self.originality,
        }
    }

    /// Store `value` for `criterion`, clamped to the score domain.
    ///
    /// Returns the value actually stored. Other criteria are untouched.
    pub fn set(&mut self, criterion: Criterion, value: i64) -> u8 {
        let value = clamp_score(value);
        let slot = match criterion {
            Criterion::Technique => &mut self.technique,
            Criterion::Creativity => &mut self.creativity,
            Criterion::StagePresence => &mut self.stage_presence,
            Criterion::Originality => &mut self.originality,
        };
        *slot = value;
        value
    }

    /// Sum of all criterion scores.
    #[must_use]
    pub fn total(&self) -> u32 {
        Criterion::ALL
            .iter()
            .map(|criterion| u32::from(self.get(*criterion)))
            .sum()
    }

    /// Arithmetic mean of the criteria, rounded half-up to one decimal.
    ///
    /// Computed in integer tenths so `6.75` rounds to `6.8` without
    /// floating-point drift.
    #[must_use]
    pub fn composite(&self) -> f64 {
        // Criterion::ALL has four entries; the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let count = Criterion::ALL.len() as u32;
        let tenths = (self.total() * 10 * 2 + count) / (count * 2);
        f64::from(tenths) / 10.0
    }

    /// Validate a stored criteria mapping.
    ///
    /// Every criterion must be present and in range; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a non-object, a missing key, or an
    /// out-of-range or non-integer value, and `CoreError::UnknownCriterion`
    /// for an extra key.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CoreError> {
        let map = value
            .as_object()
            .ok_or_else(|| CoreError::Validation("criteria scores must be an object".into()))?;

        for key in map.keys() {
            key.parse::<Criterion>()?;
        }

        let mut scores = Self::default();
        for criterion in Criterion::ALL {
            let raw = map
                .get(criterion.key())
                .and_then(serde_json::Value::as_i64)
                .ok_or_else(|| {
                    CoreError::Validation(format!("missing or non-integer '{criterion}' score"))
                })?;
            if raw < i64::from(MIN_SCORE) || raw > i64::from(MAX_SCORE) {
                return Err(CoreError::Validation(format!(
                    "'{criterion}' score {raw} outside {MIN_SCORE}..={MAX_SCORE}"
                )));
            }
            scores.set(criterion, raw);
        }
        Ok(scores)
    }
}

/// The in-progress evaluation of the focused contestant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreDraft {
    pub contestant_id: String,
    pub scores: CriteriaScores,
    pub comment: String,
}

impl ScoreDraft {
    /// A draft at defaults: every criterion at [`DEFAULT_SCORE`], empty comment.
    #[must_use]
    pub fn fresh(contestant_id: impl Into<String>) -> Self {
        Self {
            contestant_id: contestant_id.into(),
            scores: CriteriaScores::default(),
            comment: String::new(),
        }
    }

    pub fn set_score(&mut self, criterion: Criterion, value: i64) -> u8 {
        self.scores.set(criterion, value)
    }

    pub fn set_comment(&mut self, text: &str) {
        self.comment = truncate_comment(text);
    }

    #[must_use]
    pub fn composite(&self) -> f64 {
        self.scores.composite()
    }
}
