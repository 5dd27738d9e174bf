//! Entity structs for the jury voting domain.
//!
//! Each entity maps to a backend table row (`contestants`, `jury_votes`) or to
//! a value exchanged with the backend collaborators. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod contestant;
mod history;
mod jury_vote;

pub use contestant::Contestant;
pub use history::VoteHistoryItem;
pub use jury_vote::{ExistingVote, JuryVoteRecord, VoteUpsert};
