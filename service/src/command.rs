//! Commands accepted by the engine service loop.

use agora_engine::{EngineError, Proposal, WorkflowStatus};
use agora_types::{ProposalId, VoterAddress};
use tokio::sync::oneshot;

/// One queued operation request, carrying the caller identity and a reply
/// channel. The service applies commands strictly in arrival order.
#[derive(Debug)]
pub enum EngineCommand {
    RegisterVoter {
        caller: VoterAddress,
        address: VoterAddress,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    StartProposalsRegistration {
        caller: VoterAddress,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    EndProposalsRegistration {
        caller: VoterAddress,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    StartVotingSession {
        caller: VoterAddress,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    EndVotingSession {
        caller: VoterAddress,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    TallyVotes {
        caller: VoterAddress,
        reply: oneshot::Sender<Result<ProposalId, EngineError>>,
    },
    SubmitProposal {
        caller: VoterAddress,
        description: String,
        reply: oneshot::Sender<Result<ProposalId, EngineError>>,
    },
    CastVote {
        caller: VoterAddress,
        proposal: ProposalId,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    GetProposal {
        caller: VoterAddress,
        id: ProposalId,
        reply: oneshot::Sender<Result<Proposal, EngineError>>,
    },
    /// Readable by anyone; `None` until the tally has run.
    Winner {
        reply: oneshot::Sender<Option<ProposalId>>,
    },
    Status {
        reply: oneshot::Sender<WorkflowStatus>,
    },
}
