//! Read-model values derived from session state for display.
//!
//! Nothing here drives control flow.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Voting progress over the contestant list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProgressStats {
    pub voted: usize,
    pub remaining: usize,
    pub total: usize,
    /// `voted / total`, or `0.0` for an empty list.
    pub ratio: f64,
    /// `ratio` as a whole percentage, rounded.
    pub percent: u8,
}

impl ProgressStats {
    #[must_use]
    pub fn new(voted: usize, total: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let ratio = if total == 0 {
            0.0
        } else {
            voted as f64 / total as f64
        };
        // ratio is within [0, 1] whenever voted <= total; clamp covers the rest.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
        Self {
            voted,
            remaining: total.saturating_sub(voted),
            total,
            ratio,
            percent,
        }
    }
}

/// 1-based position of the focused contestant, e.g. "3 / 12".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_zero_progress() {
        let stats = ProgressStats::new(0, 0);
        assert!(stats.ratio.abs() < f64::EPSILON);
        assert_eq!(stats.percent, 0);
        assert_eq!(stats.remaining, 0);
    }

    #[test]
    fn percent_is_rounded() {
        let stats = ProgressStats::new(2, 3);
        assert_eq!(stats.percent, 67);
        assert_eq!(stats.remaining, 1);
        assert!((stats.ratio - 2.0 / 3.0).abs() < f64::EPSILON);
    }
}
