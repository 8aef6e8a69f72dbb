//! Serialized access to one [`VotingEngine`].
//!
//! The engine itself is a plain `&mut self` state machine. This crate wraps
//! it in the single-writer discipline the workflow requires: a spawned task
//! owns the engine and drains a command queue, applying each command as one
//! atomic step in arrival order. External callers hold a cloneable
//! [`EngineHandle`] and await replies over oneshot channels, so no two
//! operations ever interleave their reads and writes of engine state.
//!
//! [`VotingEngine`]: agora_engine::VotingEngine

pub mod command;
pub mod service;

pub use command::EngineCommand;
pub use service::{EngineHandle, EngineService, ServiceError};
