//! Fundamental types for the AGORA voting workflow.
//!
//! This crate defines the identifiers shared across every other crate in the
//! workspace: voter addresses and proposal ids.

pub mod address;
pub mod id;

pub use address::VoterAddress;
pub use id::ProposalId;
