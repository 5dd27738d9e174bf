//! Vote history view built when a session opens.

use std::collections::HashMap;

use jury_core::entities::{Contestant, ExistingVote, VoteHistoryItem};

/// Join `votes` with contestant names, in the order the store returned them.
///
/// Votes for contestants outside `contestants` are skipped. At most `limit`
/// items are kept.
#[must_use]
pub fn build_history(
    votes: &[ExistingVote],
    contestants: &[Contestant],
    limit: usize,
) -> Vec<VoteHistoryItem> {
    let names: HashMap<&str, &str> = contestants
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    votes
        .iter()
        .filter_map(|vote| {
            let name = names.get(vote.contestant_id.as_str())?;
            Some(VoteHistoryItem {
                contestant_id: vote.contestant_id.clone(),
                contestant_name: (*name).to_string(),
                score: vote.score,
                created_at: vote.created_at,
            })
        })
        .take(limit)
        .collect()
}
