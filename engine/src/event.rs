//! Events emitted by the engine for observers.

use crate::status::WorkflowStatus;
use agora_types::{ProposalId, VoterAddress};

/// Notifications the engine emits, each only after the corresponding state
/// mutation has committed. A rejected operation emits nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// The administrator enrolled a voter.
    VoterRegistered { address: VoterAddress },
    /// The workflow advanced one phase.
    WorkflowStatusChanged {
        previous: WorkflowStatus,
        next: WorkflowStatus,
    },
    /// A voter submitted a proposal.
    ProposalRegistered { id: ProposalId },
    /// A voter cast their vote.
    VoteCast {
        voter: VoterAddress,
        proposal: ProposalId,
    },
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the mutating call; keep handlers fast so
/// they do not stall the operation that triggered them.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&EngineEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&EngineEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &EngineEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&EngineEvent::ProposalRegistered {
            id: ProposalId::GENESIS,
        });

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&EngineEvent::VoterRegistered {
            address: VoterAddress::new("alice"),
        }); // should not panic
    }

    #[test]
    fn listener_receives_correct_event_variant() {
        let saw_vote = Arc::new(AtomicUsize::new(0));
        let saw_phase = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let sv = Arc::clone(&saw_vote);
        let sp = Arc::clone(&saw_phase);
        bus.subscribe(Box::new(move |event| match event {
            EngineEvent::VoteCast { .. } => {
                sv.fetch_add(1, Ordering::SeqCst);
            }
            EngineEvent::WorkflowStatusChanged { .. } => {
                sp.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));

        bus.emit(&EngineEvent::VoteCast {
            voter: VoterAddress::new("alice"),
            proposal: ProposalId::new(1),
        });
        bus.emit(&EngineEvent::WorkflowStatusChanged {
            previous: WorkflowStatus::RegisteringVoters,
            next: WorkflowStatus::ProposalsRegistrationStarted,
        });

        assert_eq!(saw_vote.load(Ordering::SeqCst), 1);
        assert_eq!(saw_phase.load(Ordering::SeqCst), 1);
    }
}
