//! The voting engine — phase-gated operations over one owned state.
//!
//! Every public operation takes the caller's address as an explicit
//! capability parameter and checks it against either the administrator or the
//! voter registry before touching anything else. Checks run in a fixed order
//! (identity, then phase, then arguments) and precede all mutation, so a
//! rejected call is always a pure no-op.

use crate::error::EngineError;
use crate::event::{EngineEvent, EventBus};
use crate::proposal::Proposal;
use crate::status::WorkflowStatus;
use crate::voter::Voter;
use agora_types::{ProposalId, VoterAddress};
use std::collections::HashMap;

/// A single governed voting process.
///
/// Explicitly constructed and explicitly owned — callers (typically the
/// `agora-service` actor) hold the only instance and serialize access to it.
pub struct VotingEngine {
    /// The one identity allowed to drive phase transitions and enrollment.
    /// Fixed at construction, never changes.
    admin: VoterAddress,
    status: WorkflowStatus,
    voters: HashMap<VoterAddress, Voter>,
    /// Dense proposal list; `ProposalId` is an index into it.
    proposals: Vec<Proposal>,
    /// Set exactly once, by `tally_votes`.
    winner: Option<ProposalId>,
    events: EventBus,
}

impl VotingEngine {
    /// Create an engine in the `RegisteringVoters` phase, administered by
    /// `admin`.
    pub fn new(admin: VoterAddress) -> Self {
        Self {
            admin,
            status: WorkflowStatus::RegisteringVoters,
            voters: HashMap::new(),
            proposals: Vec::new(),
            winner: None,
            events: EventBus::new(),
        }
    }

    pub fn admin(&self) -> &VoterAddress {
        &self.admin
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// Number of proposals registered so far (including GENESIS once proposal
    /// registration has opened).
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// The winning proposal id. `None` until `tally_votes` has run.
    pub fn winner(&self) -> Option<ProposalId> {
        self.winner
    }

    /// Attach an observer for engine events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&EngineEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // --- guards ---

    fn require_admin(&self, caller: &VoterAddress) -> Result<(), EngineError> {
        if caller != &self.admin {
            return Err(EngineError::Unauthorized(caller.clone()));
        }
        Ok(())
    }

    fn require_voter(&self, caller: &VoterAddress) -> Result<(), EngineError> {
        match self.voters.get(caller) {
            Some(v) if v.is_registered => Ok(()),
            _ => Err(EngineError::Forbidden(caller.clone())),
        }
    }

    fn require_status(&self, required: WorkflowStatus) -> Result<(), EngineError> {
        if self.status != required {
            return Err(EngineError::InvalidPhase {
                required,
                current: self.status,
            });
        }
        Ok(())
    }

    /// Advance the workflow one step and emit the status-change event.
    /// Callers must have verified the current phase first.
    fn advance_status(&mut self) {
        let previous = self.status;
        // Guarded transitions never run from the terminal phase.
        let next = previous.next().unwrap_or(previous);
        self.status = next;
        tracing::info!(%previous, %next, "workflow status changed");
        self.events
            .emit(&EngineEvent::WorkflowStatusChanged { previous, next });
    }

    // --- administrator operations ---

    /// Enroll `address` as a voter. Admin-only; not phase-gated (the
    /// administrator may enroll late, though late enrollees can only act in
    /// whatever phases remain).
    pub fn register_voter(
        &mut self,
        caller: &VoterAddress,
        address: VoterAddress,
    ) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        if self.voters.contains_key(&address) {
            return Err(EngineError::AlreadyRegistered(address));
        }
        self.voters.insert(address.clone(), Voter::registered());
        tracing::info!(voter = %address, "voter registered");
        self.events.emit(&EngineEvent::VoterRegistered { address });
        Ok(())
    }

    /// Open proposal registration. Creates the GENESIS proposal at id 0 so
    /// the first participant submission receives id 1.
    pub fn start_proposals_registration(
        &mut self,
        caller: &VoterAddress,
    ) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.require_status(WorkflowStatus::RegisteringVoters)?;

        self.proposals.push(Proposal::genesis());
        self.advance_status();
        Ok(())
    }

    /// Freeze the proposal list.
    pub fn end_proposals_registration(
        &mut self,
        caller: &VoterAddress,
    ) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.require_status(WorkflowStatus::ProposalsRegistrationStarted)?;
        self.advance_status();
        Ok(())
    }

    /// Open the voting session.
    pub fn start_voting_session(&mut self, caller: &VoterAddress) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.require_status(WorkflowStatus::ProposalsRegistrationEnded)?;
        self.advance_status();
        Ok(())
    }

    /// Close the voting session.
    pub fn end_voting_session(&mut self, caller: &VoterAddress) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.require_status(WorkflowStatus::VotingSessionStarted)?;
        self.advance_status();
        Ok(())
    }

    /// Compute the winner and enter the terminal phase.
    ///
    /// Single linear scan with a strict `>` comparison, so the
    /// first-registered proposal wins ties. Returns the winning id.
    pub fn tally_votes(&mut self, caller: &VoterAddress) -> Result<ProposalId, EngineError> {
        self.require_admin(caller)?;
        self.require_status(WorkflowStatus::VotingSessionEnded)?;

        // The proposal list is non-empty here: this phase is only reachable
        // through start_proposals_registration, which pushed GENESIS.
        let mut winner = ProposalId::GENESIS;
        let mut best = self.proposals[0].vote_count;
        for (index, proposal) in self.proposals.iter().enumerate().skip(1) {
            if proposal.vote_count > best {
                best = proposal.vote_count;
                winner = ProposalId::new(index as u64);
            }
        }

        // Vote conservation: every counted vote belongs to exactly one voter
        // that flipped has_voted.
        debug_assert_eq!(
            self.proposals.iter().map(|p| p.vote_count as usize).sum::<usize>(),
            self.voters.values().filter(|v| v.has_voted).count(),
        );

        self.winner = Some(winner);
        tracing::info!(winner = %winner, votes = best, "votes tallied");
        self.advance_status();
        Ok(winner)
    }

    // --- voter operations ---

    /// Submit a proposal. Returns the assigned id (1-based for participant
    /// submissions, since GENESIS holds id 0).
    pub fn submit_proposal(
        &mut self,
        caller: &VoterAddress,
        description: impl Into<String>,
    ) -> Result<ProposalId, EngineError> {
        self.require_voter(caller)?;
        self.require_status(WorkflowStatus::ProposalsRegistrationStarted)?;

        let description = description.into();
        if description.trim().is_empty() {
            return Err(EngineError::EmptyDescription);
        }

        let id = ProposalId::new(self.proposals.len() as u64);
        self.proposals.push(Proposal::new(description));
        tracing::info!(proposal = %id, voter = %caller, "proposal registered");
        self.events.emit(&EngineEvent::ProposalRegistered { id });
        Ok(id)
    }

    /// Cast the caller's single vote for `proposal`.
    pub fn cast_vote(
        &mut self,
        caller: &VoterAddress,
        proposal: ProposalId,
    ) -> Result<(), EngineError> {
        self.require_voter(caller)?;
        self.require_status(WorkflowStatus::VotingSessionStarted)?;

        if let Some(voter) = self.voters.get(caller) {
            if voter.has_voted {
                return Err(EngineError::AlreadyVoted(caller.clone()));
            }
        }
        if proposal.as_index() >= self.proposals.len() {
            return Err(EngineError::UnknownProposal(proposal));
        }

        self.proposals[proposal.as_index()].vote_count += 1;
        if let Some(voter) = self.voters.get_mut(caller) {
            voter.record_vote(proposal);
        }
        tracing::info!(voter = %caller, proposal = %proposal, "vote cast");
        self.events.emit(&EngineEvent::VoteCast {
            voter: caller.clone(),
            proposal,
        });
        Ok(())
    }

    /// Read one proposal. Voter-only, like the original contract's getter.
    pub fn proposal(
        &self,
        caller: &VoterAddress,
        id: ProposalId,
    ) -> Result<&Proposal, EngineError> {
        self.require_voter(caller)?;
        self.proposals
            .get(id.as_index())
            .ok_or(EngineError::UnknownProposal(id))
    }

    /// Read one registry entry. Voter-only.
    pub fn voter(&self, caller: &VoterAddress, address: &VoterAddress) -> Result<&Voter, EngineError> {
        self.require_voter(caller)?;
        self.voters
            .get(address)
            .ok_or_else(|| EngineError::Forbidden(address.clone()))
    }
}
