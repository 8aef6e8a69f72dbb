//! The engine service loop and its client handle.

use crate::command::EngineCommand;
use agora_engine::{EngineError, Proposal, VotingEngine, WorkflowStatus};
use agora_types::{ProposalId, VoterAddress};
use agora_utils::{OpStats, OpStatsSnapshot};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Queued commands before backpressure kicks in on senders.
const COMMAND_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The operation reached the engine and was rejected.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The service task has stopped; no further operations are possible.
    #[error("engine service is not running")]
    Stopped,
}

/// Owns one [`VotingEngine`] on a spawned task and applies commands from the
/// queue one at a time, in arrival order.
pub struct EngineService {
    commands: mpsc::Receiver<EngineCommand>,
    engine: VotingEngine,
    stats: Arc<OpStats>,
}

impl EngineService {
    /// Spawn the service task around `engine`.
    ///
    /// Returns a cloneable handle and the join handle for the loop; the loop
    /// exits once every `EngineHandle` has been dropped.
    pub fn spawn(engine: VotingEngine) -> (EngineHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let stats = Arc::new(OpStats::new());

        let service = EngineService {
            commands: rx,
            engine,
            stats: Arc::clone(&stats),
        };
        let join = tokio::spawn(service.run());

        (EngineHandle { tx, stats }, join)
    }

    async fn run(mut self) {
        tracing::info!(admin = %self.engine.admin(), "engine service started");
        while let Some(command) = self.commands.recv().await {
            self.apply(command);
        }
        let snapshot = self.stats.snapshot();
        tracing::info!(
            accepted = snapshot.accepted,
            rejected = snapshot.rejected,
            status = %self.engine.status(),
            "engine service stopped"
        );
    }

    /// Apply one command atomically and send the outcome to the caller.
    ///
    /// A dropped reply receiver is not an error: the operation has already
    /// committed (or been rejected) by the time the send fails.
    fn apply(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::RegisterVoter {
                caller,
                address,
                reply,
            } => {
                let result = self.engine.register_voter(&caller, address);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::StartProposalsRegistration { caller, reply } => {
                let result = self.engine.start_proposals_registration(&caller);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::EndProposalsRegistration { caller, reply } => {
                let result = self.engine.end_proposals_registration(&caller);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::StartVotingSession { caller, reply } => {
                let result = self.engine.start_voting_session(&caller);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::EndVotingSession { caller, reply } => {
                let result = self.engine.end_voting_session(&caller);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::TallyVotes { caller, reply } => {
                let result = self.engine.tally_votes(&caller);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::SubmitProposal {
                caller,
                description,
                reply,
            } => {
                let result = self.engine.submit_proposal(&caller, description);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::CastVote {
                caller,
                proposal,
                reply,
            } => {
                let result = self.engine.cast_vote(&caller, proposal);
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::GetProposal { caller, id, reply } => {
                let result = self.engine.proposal(&caller, id).cloned();
                self.record(&result);
                let _ = reply.send(result);
            }
            EngineCommand::Winner { reply } => {
                let _ = reply.send(self.engine.winner());
            }
            EngineCommand::Status { reply } => {
                let _ = reply.send(self.engine.status());
            }
        }
    }

    fn record<T>(&self, result: &Result<T, EngineError>) {
        match result {
            Ok(_) => self.stats.record_accepted(),
            Err(error) => {
                self.stats.record_rejected();
                tracing::warn!(%error, "operation rejected");
            }
        }
    }
}

/// Cloneable client for the service loop.
///
/// Each method queues one command and awaits its reply; commands from any
/// number of handles are applied in the order they reach the queue.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
    stats: Arc<OpStats>,
}

impl EngineHandle {
    async fn request<T>(
        &self,
        command: EngineCommand,
        reply: oneshot::Receiver<Result<T, EngineError>>,
    ) -> Result<T, ServiceError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| ServiceError::Stopped)?;
        reply.await.map_err(|_| ServiceError::Stopped)?.map_err(ServiceError::Engine)
    }

    pub async fn register_voter(
        &self,
        caller: VoterAddress,
        address: VoterAddress,
    ) -> Result<(), ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(
            EngineCommand::RegisterVoter {
                caller,
                address,
                reply: tx,
            },
            rx,
        )
        .await
    }

    pub async fn start_proposals_registration(
        &self,
        caller: VoterAddress,
    ) -> Result<(), ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(
            EngineCommand::StartProposalsRegistration { caller, reply: tx },
            rx,
        )
        .await
    }

    pub async fn end_proposals_registration(
        &self,
        caller: VoterAddress,
    ) -> Result<(), ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(
            EngineCommand::EndProposalsRegistration { caller, reply: tx },
            rx,
        )
        .await
    }

    pub async fn start_voting_session(&self, caller: VoterAddress) -> Result<(), ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(EngineCommand::StartVotingSession { caller, reply: tx }, rx)
            .await
    }

    pub async fn end_voting_session(&self, caller: VoterAddress) -> Result<(), ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(EngineCommand::EndVotingSession { caller, reply: tx }, rx)
            .await
    }

    pub async fn tally_votes(&self, caller: VoterAddress) -> Result<ProposalId, ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(EngineCommand::TallyVotes { caller, reply: tx }, rx)
            .await
    }

    pub async fn submit_proposal(
        &self,
        caller: VoterAddress,
        description: impl Into<String>,
    ) -> Result<ProposalId, ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(
            EngineCommand::SubmitProposal {
                caller,
                description: description.into(),
                reply: tx,
            },
            rx,
        )
        .await
    }

    pub async fn cast_vote(
        &self,
        caller: VoterAddress,
        proposal: ProposalId,
    ) -> Result<(), ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(
            EngineCommand::CastVote {
                caller,
                proposal,
                reply: tx,
            },
            rx,
        )
        .await
    }

    pub async fn proposal(
        &self,
        caller: VoterAddress,
        id: ProposalId,
    ) -> Result<Proposal, ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.request(EngineCommand::GetProposal { caller, id, reply: tx }, rx)
            .await
    }

    pub async fn winner(&self) -> Result<Option<ProposalId>, ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::Winner { reply: tx })
            .await
            .map_err(|_| ServiceError::Stopped)?;
        rx.await.map_err(|_| ServiceError::Stopped)
    }

    pub async fn status(&self) -> Result<WorkflowStatus, ServiceError> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::Status { reply: tx })
            .await
            .map_err(|_| ServiceError::Stopped)?;
        rx.await.map_err(|_| ServiceError::Stopped)
    }

    /// Counters of operations the service has applied so far.
    pub fn stats(&self) -> OpStatsSnapshot {
        self.stats.snapshot()
    }
}
