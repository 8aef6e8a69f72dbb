//! Shared utilities for the AGORA workspace.

pub mod logging;
pub mod stats;

pub use logging::init_tracing;
pub use stats::{OpStats, OpStatsSnapshot};
