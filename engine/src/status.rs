//! The six phases of the voting workflow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow phase shared by the whole engine.
///
/// Strictly monotonic: the administrator advances the phase one step at a
/// time, and no phase is ever revisited or skipped. The derived `Ord` follows
/// declaration order, so "never goes backwards" is checkable with `<=`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WorkflowStatus {
    /// The administrator enrolls voters.
    RegisteringVoters,
    /// Enrolled voters may submit proposals.
    ProposalsRegistrationStarted,
    /// Proposal list is frozen; voting has not begun.
    ProposalsRegistrationEnded,
    /// Enrolled voters may cast their single vote.
    VotingSessionStarted,
    /// Votes are frozen; the tally has not run.
    VotingSessionEnded,
    /// Winner computed. Terminal phase.
    VotesTallied,
}

impl WorkflowStatus {
    /// The phase that follows this one, or `None` from the terminal phase.
    pub fn next(self) -> Option<WorkflowStatus> {
        use WorkflowStatus::*;
        match self {
            RegisteringVoters => Some(ProposalsRegistrationStarted),
            ProposalsRegistrationStarted => Some(ProposalsRegistrationEnded),
            ProposalsRegistrationEnded => Some(VotingSessionStarted),
            VotingSessionStarted => Some(VotingSessionEnded),
            VotingSessionEnded => Some(VotesTallied),
            VotesTallied => None,
        }
    }

    /// Whether this is the terminal phase.
    pub fn is_terminal(self) -> bool {
        self == WorkflowStatus::VotesTallied
    }

    pub fn as_str(self) -> &'static str {
        use WorkflowStatus::*;
        match self {
            RegisteringVoters => "RegisteringVoters",
            ProposalsRegistrationStarted => "ProposalsRegistrationStarted",
            ProposalsRegistrationEnded => "ProposalsRegistrationEnded",
            VotingSessionStarted => "VotingSessionStarted",
            VotingSessionEnded => "VotingSessionEnded",
            VotesTallied => "VotesTallied",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WorkflowStatus::*;

    #[test]
    fn phases_chain_in_order() {
        assert_eq!(RegisteringVoters.next(), Some(ProposalsRegistrationStarted));
        assert_eq!(
            ProposalsRegistrationStarted.next(),
            Some(ProposalsRegistrationEnded)
        );
        assert_eq!(ProposalsRegistrationEnded.next(), Some(VotingSessionStarted));
        assert_eq!(VotingSessionStarted.next(), Some(VotingSessionEnded));
        assert_eq!(VotingSessionEnded.next(), Some(VotesTallied));
        assert_eq!(VotesTallied.next(), None);
    }

    #[test]
    fn next_always_moves_forward() {
        let mut status = RegisteringVoters;
        while let Some(next) = status.next() {
            assert!(status < next);
            status = next;
        }
        assert!(status.is_terminal());
    }

    #[test]
    fn only_votes_tallied_is_terminal() {
        assert!(VotesTallied.is_terminal());
        assert!(!RegisteringVoters.is_terminal());
        assert!(!VotingSessionEnded.is_terminal());
    }

    #[test]
    fn display_matches_variant_name() {
        assert_eq!(RegisteringVoters.to_string(), "RegisteringVoters");
        assert_eq!(VotesTallied.to_string(), "VotesTallied");
    }
}
