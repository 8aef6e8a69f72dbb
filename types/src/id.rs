//! Proposal identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense, 0-based index of a proposal in registration order.
///
/// Id 0 is reserved for the GENESIS proposal the engine creates when proposal
/// registration opens; the first participant-submitted proposal gets id 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(u64);

impl ProposalId {
    /// The implicit proposal created when proposal registration opens.
    pub const GENESIS: ProposalId = ProposalId(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Index into a dense proposal list.
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProposalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_is_id_zero() {
        assert_eq!(ProposalId::GENESIS, ProposalId::new(0));
        assert_eq!(ProposalId::GENESIS.as_index(), 0);
    }

    #[test]
    fn ids_order_by_value() {
        assert!(ProposalId::new(1) < ProposalId::new(2));
        assert_eq!(ProposalId::from(7).as_u64(), 7);
    }
}
