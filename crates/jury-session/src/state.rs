//! In-memory scoring session state.
//!
//! Owns the ordered contestant list, the cursor into it, the voted-set, and
//! the draft for the focused contestant. Pure and synchronous: the
//! controller layers submission and notification on top.

use std::collections::BTreeSet;

use jury_core::entities::{Contestant, ExistingVote};
use jury_core::enums::{Criterion, Direction, FocusState};
use jury_core::responses::{Position, ProgressStats};
use jury_core::scoring::ScoreDraft;

/// Session state for one juror.
///
/// Invariant: `draft` is `Some` exactly when `contestants` is non-empty, and
/// then `cursor < contestants.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    contestants: Vec<Contestant>,
    cursor: usize,
    voted: BTreeSet<String>,
    draft: Option<ScoreDraft>,
}

impl SessionState {
    /// Build the initial state: cursor at 0, voted-set seeded from
    /// `existing_votes`, fresh draft for the first contestant.
    ///
    /// The list is taken as given (already sorted by name); it is not
    /// re-sorted. Votes for contestants outside the list are not counted.
    #[must_use]
    pub fn new(contestants: Vec<Contestant>, existing_votes: &[ExistingVote]) -> Self {
        let known: BTreeSet<&str> = contestants.iter().map(|c| c.id.as_str()).collect();
        let voted = existing_votes
            .iter()
            .filter(|vote| known.contains(vote.contestant_id.as_str()))
            .map(|vote| vote.contestant_id.clone())
            .collect();
        let draft = contestants.first().map(|c| ScoreDraft::fresh(&c.id));
        Self {
            contestants,
            cursor: 0,
            voted,
            draft,
        }
    }

    #[must_use]
    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }

    /// Cursor index, or `None` for an empty session.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.cursor)
    }

    #[must_use]
    pub fn current(&self) -> Option<&Contestant> {
        self.contestants.get(self.cursor)
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&ScoreDraft> {
        self.draft.as_ref()
    }

    #[must_use]
    pub const fn voted(&self) -> &BTreeSet<String> {
        &self.voted
    }

    #[must_use]
    pub fn has_voted(&self, contestant_id: &str) -> bool {
        self.voted.contains(contestant_id)
    }

    #[must_use]
    pub fn focus_state(&self) -> Option<FocusState> {
        self.current().map(|c| {
            if self.has_voted(&c.id) {
                FocusState::Voted
            } else {
                FocusState::Unvoted
            }
        })
    }

    /// `voted / total`, or `0.0` when there are no contestants.
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        self.stats().ratio
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        ProgressStats::new(self.voted.len(), self.contestants.len())
    }

    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.cursor().map(|cursor| Position {
            index: cursor + 1,
            total: self.contestants.len(),
        })
    }

    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.cursor + 1 < self.contestants.len()
    }

    /// Set one criterion on the draft, clamped to the score domain.
    ///
    /// Returns the stored value, or `None` for an empty session.
    pub fn set_criterion_score(&mut self, criterion: Criterion, value: i64) -> Option<u8> {
        self.draft
            .as_mut()
            .map(|draft| draft.set_score(criterion, value))
    }

    /// Store the comment truncated to its first 1000 characters.
    ///
    /// Returns `false` for an empty session.
    pub fn set_comment(&mut self, text: &str) -> bool {
        self.draft.as_mut().is_some_and(|draft| {
            draft.set_comment(text);
            true
        })
    }

    /// Move the cursor one step. At either end this is a no-op.
    ///
    /// On a move the draft is reset to defaults for the new contestant, even
    /// if that contestant already has a stored vote.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Previous if self.can_go_previous() => self.cursor - 1,
            Direction::Next if self.can_go_next() => self.cursor + 1,
            _ => return false,
        };
        self.focus(target);
        true
    }

    /// Record a vote and, when `submitted_at` is still focused and has a
    /// successor, move to the successor with a fresh draft.
    ///
    /// Returns whether the cursor advanced.
    pub(crate) fn apply_accepted(&mut self, contestant_id: &str, submitted_at: usize) -> bool {
        self.voted.insert(contestant_id.to_string());
        if self.cursor == submitted_at && self.can_go_next() {
            self.focus(self.cursor + 1);
            return true;
        }
        false
    }

    fn focus(&mut self, index: usize) {
        self.cursor = index;
        self.draft = self.contestants.get(index).map(|c| ScoreDraft::fresh(&c.id));
    }
}
