//! Operation statistics counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe accepted/rejected counters for engine operations.
///
/// Incremented by the service loop for every command it applies; read when a
/// session ends to summarize what happened.
#[derive(Debug, Default)]
pub struct OpStats {
    accepted: AtomicU64,
    rejected: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpStatsSnapshot {
    pub accepted: u64,
    pub rejected: u64,
}

impl OpStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> OpStatsSnapshot {
        OpStatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = OpStats::new();
        let snap = stats.snapshot();
        assert_eq!(snap.accepted, 0);
        assert_eq!(snap.rejected, 0);
    }

    #[test]
    fn counters_accumulate_independently() {
        let stats = OpStats::new();
        stats.record_accepted();
        stats.record_accepted();
        stats.record_rejected();
        let snap = stats.snapshot();
        assert_eq!(snap.accepted, 2);
        assert_eq!(snap.rejected, 1);
    }
}
