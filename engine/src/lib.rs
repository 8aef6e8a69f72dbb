//! AGORA voting engine.
//!
//! A six-phase governed voting workflow: one administrator drives the phase
//! transitions, enrolled voters register proposals and cast one vote each,
//! and a final tally derives the winning proposal (first-registered wins
//! ties).
//!
//! The engine is a plain synchronous state machine: every operation takes the
//! caller's address explicitly, validates identity → phase → arguments in
//! that order, and either applies one atomic mutation or returns an
//! [`EngineError`] leaving state untouched. Serialization of concurrent
//! callers is the job of the `agora-service` crate.

pub mod engine;
pub mod error;
pub mod event;
pub mod proposal;
pub mod status;
pub mod voter;

pub use engine::VotingEngine;
pub use error::EngineError;
pub use event::{EngineEvent, EventBus};
pub use proposal::{Proposal, GENESIS_DESCRIPTION};
pub use status::WorkflowStatus;
pub use voter::Voter;
