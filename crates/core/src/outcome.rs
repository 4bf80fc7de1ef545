//! Scenario classifications
//!
//! A classification is computed once when a scenario ends and recorded as a
//! log line. It is returned to the caller for inspection but never persisted
//! in structured form.

use std::fmt;

/// What a scenario observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Unsynchronized increments lost updates
    RaceDetected,
    /// Unsynchronized increments happened to produce the expected total
    NoRace,
    /// Lock-protected increments produced the expected total
    SyncSuccess,
    /// Lock-protected increments did not produce the expected total
    SyncMismatch,
    /// At least one deadlock worker was still blocked after the bounded wait
    DeadlockDetected,
    /// Both deadlock workers finished within the bounded wait
    NoDeadlock,
}

impl Classification {
    /// Stable kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::RaceDetected => "race-detected",
            Classification::NoRace => "no-race",
            Classification::SyncSuccess => "sync-success",
            Classification::SyncMismatch => "sync-mismatch",
            Classification::DeadlockDetected => "deadlock-detected",
            Classification::NoDeadlock => "no-deadlock",
        }
    }

    /// True for outcomes that indicate a broken synchronization primitive.
    pub fn is_anomaly(&self) -> bool {
        matches!(self, Classification::SyncMismatch)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a counter scenario (race or sync).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterOutcome {
    /// Observed classification
    pub classification: Classification,
    /// `num_threads * iterations`
    pub expected: u64,
    /// Final counter value after all workers joined
    pub actual: u64,
}

impl CounterOutcome {
    /// Increments that were overwritten by a concurrent writer.
    pub fn lost_updates(&self) -> u64 {
        self.expected.saturating_sub(self.actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_names() {
        assert_eq!(Classification::RaceDetected.to_string(), "race-detected");
        assert_eq!(Classification::NoRace.to_string(), "no-race");
        assert_eq!(Classification::SyncSuccess.to_string(), "sync-success");
        assert_eq!(Classification::SyncMismatch.to_string(), "sync-mismatch");
        assert_eq!(
            Classification::DeadlockDetected.to_string(),
            "deadlock-detected"
        );
        assert_eq!(Classification::NoDeadlock.to_string(), "no-deadlock");
    }

    #[test]
    fn test_only_sync_mismatch_is_anomaly() {
        assert!(Classification::SyncMismatch.is_anomaly());
        assert!(!Classification::RaceDetected.is_anomaly());
        assert!(!Classification::DeadlockDetected.is_anomaly());
    }

    #[test]
    fn test_lost_updates() {
        let outcome = CounterOutcome {
            classification: Classification::RaceDetected,
            expected: 500,
            actual: 320,
        };
        assert_eq!(outcome.lost_updates(), 180);
    }
}
