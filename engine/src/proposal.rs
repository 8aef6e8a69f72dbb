//! Proposals and their vote counts.

use serde::{Deserialize, Serialize};

/// Description of the implicit proposal created when proposal registration
/// opens. It occupies id 0 so the first participant submission gets id 1.
pub const GENESIS_DESCRIPTION: &str = "GENESIS";

/// A named option with an accumulating vote count.
///
/// Proposals are stored in a dense list indexed by `ProposalId`; they are
/// never removed, and only `cast_vote` mutates `vote_count`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u32,
}

impl Proposal {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
        }
    }

    /// The auto-created placeholder at id 0.
    pub fn genesis() -> Self {
        Self::new(GENESIS_DESCRIPTION)
    }
}
