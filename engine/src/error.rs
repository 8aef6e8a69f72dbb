use crate::status::WorkflowStatus;
use agora_types::{ProposalId, VoterAddress};
use thiserror::Error;

/// Every way an engine operation can be rejected.
///
/// All rejections are terminal and synchronous: the offending call is a no-op
/// and the engine state is left exactly as it was. There are no retryable
/// failure modes — the engine performs no I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("caller {0} is not the administrator")]
    Unauthorized(VoterAddress),

    #[error("caller {0} is not a registered voter")]
    Forbidden(VoterAddress),

    #[error("operation requires phase {required}, current phase is {current}")]
    InvalidPhase {
        required: WorkflowStatus,
        current: WorkflowStatus,
    },

    #[error("voter {0} is already registered")]
    AlreadyRegistered(VoterAddress),

    #[error("voter {0} has already voted")]
    AlreadyVoted(VoterAddress),

    #[error("unknown proposal id {0}")]
    UnknownProposal(ProposalId),

    #[error("proposal description must not be empty")]
    EmptyDescription,
}
