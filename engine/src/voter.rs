//! Per-voter registry entry.

use agora_types::ProposalId;
use serde::{Deserialize, Serialize};

/// State the engine tracks for one enrolled voter.
///
/// Entries are created by the administrator and never removed. `has_voted`
/// flips false → true exactly once; `voted_proposal` is meaningful only after
/// that flip.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Always true for entries in the registry; kept explicit so a serialized
    /// registry snapshot is self-describing.
    pub is_registered: bool,
    /// Whether this voter has cast their single vote.
    pub has_voted: bool,
    /// The proposal this voter voted for, once `has_voted`.
    pub voted_proposal: Option<ProposalId>,
}

impl Voter {
    /// A freshly enrolled voter that has not voted.
    pub fn registered() -> Self {
        Self {
            is_registered: true,
            has_voted: false,
            voted_proposal: None,
        }
    }

    /// Mark this voter as having voted for `proposal`.
    pub fn record_vote(&mut self, proposal: ProposalId) {
        self.has_voted = true;
        self.voted_proposal = Some(proposal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_voter_has_not_voted() {
        let v = Voter::registered();
        assert!(v.is_registered);
        assert!(!v.has_voted);
        assert_eq!(v.voted_proposal, None);
    }

    #[test]
    fn record_vote_sets_both_fields() {
        let mut v = Voter::registered();
        v.record_vote(ProposalId::new(3));
        assert!(v.has_voted);
        assert_eq!(v.voted_proposal, Some(ProposalId::new(3)));
    }
}
