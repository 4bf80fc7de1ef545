//! Two-lock ordering inversion scenario
//!
//! T1 takes Lock A then Lock B; T2 takes Lock B then Lock A. Each worker holds
//! its first lock for a fixed delay before attempting the second, which makes
//! a circular wait likely but not certain: the outcome depends on how the
//! scheduler interleaves the two first acquisitions, and no ordering is forced.
//!
//! The orchestrator waits for each worker in turn, up to `wait_timeout` each,
//! on the worker's completion signal. If either worker is still running after
//! both waits the run is classified as deadlock-detected.
//!
//! Workers still running at that point are detached and leaked. Nothing can
//! interrupt a thread blocked on a mutex, so they stay blocked (holding their
//! first lock) until the process exits. [`DeadlockReport::leaked`] keeps
//! handles to them so their liveness remains observable.

use crate::lock::ExclusiveLock;
use crate::worker::{spawn_worker, DetachedWorker, WorkerHandle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use syncscope_core::{Classification, EventLog, LogTag, Result};

/// Default bounded wait per worker.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default pause between first and second acquisition.
pub const DEFAULT_HOLD_DELAY: Duration = Duration::from_secs(1);

/// Liveness of one worker at classification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerLiveness {
    /// Worker name ("T1" or "T2")
    pub name: String,
    /// Whether the worker had finished when the wait ended
    pub finished: bool,
}

/// Outcome of one deadlock run.
#[derive(Debug)]
pub struct DeadlockReport {
    /// deadlock-detected or no-deadlock
    pub classification: Classification,
    /// Per-worker liveness observed after the bounded waits
    pub workers: Vec<WorkerLiveness>,
    leaked: Vec<DetachedWorker>,
    locks: [Arc<ExclusiveLock>; 2],
}

impl DeadlockReport {
    /// Workers the orchestrator stopped waiting for.
    pub fn leaked(&self) -> &[DetachedWorker] {
        &self.leaked
    }

    /// Names of the workers that were still running at classification.
    pub fn stuck_workers(&self) -> Vec<&str> {
        self.workers
            .iter()
            .filter(|w| !w.finished)
            .map(|w| w.name.as_str())
            .collect()
    }

    /// Lock A and Lock B, for inspecting whether leaked workers still hold them.
    pub fn locks(&self) -> &[Arc<ExclusiveLock>; 2] {
        &self.locks
    }
}

/// Acquire `first`, hold it for `hold`, then acquire `second`.
///
/// Both guards are released when the function returns.
fn lock_pair_worker(
    log: &EventLog,
    name: &str,
    first: &ExclusiveLock,
    second: &ExclusiveLock,
    hold: Duration,
) {
    let tag = || LogTag::Worker(name.to_string());

    log.append(tag(), format!("Trying to acquire {}", first.name()));
    let _first = first.acquire();
    log.append(tag(), format!("Acquired {}", first.name()));

    thread::sleep(hold);

    log.append(tag(), format!("Trying to acquire {}", second.name()));
    let _second = second.acquire();
    log.append(tag(), format!("Acquired {}", second.name()));
}

fn spawn_lock_pair(
    log: &Arc<EventLog>,
    name: &'static str,
    first: &Arc<ExclusiveLock>,
    second: &Arc<ExclusiveLock>,
    hold: Duration,
) -> Result<WorkerHandle> {
    let log = Arc::clone(log);
    let first = Arc::clone(first);
    let second = Arc::clone(second);
    spawn_worker(name, move || {
        lock_pair_worker(&log, name, &first, &second, hold)
    })
}

/// Classify from worker liveness after the bounded waits.
pub fn classify_deadlock(workers: &[WorkerLiveness]) -> Classification {
    if workers.iter().any(|w| !w.finished) {
        Classification::DeadlockDetected
    } else {
        Classification::NoDeadlock
    }
}

/// Run the deadlock scenario with the default hold delay.
pub fn run_deadlock(log: &Arc<EventLog>, wait_timeout: Duration) -> Result<DeadlockReport> {
    run_deadlock_with(log, wait_timeout, DEFAULT_HOLD_DELAY)
}

/// Run the deadlock scenario and append the classification line to `log`.
///
/// Worker lines (`[T1] Acquired Lock A`, ...) are appended by the workers
/// themselves as they progress.
///
/// # Errors
///
/// Returns `Error::Io` if a worker thread cannot be spawned. A detected
/// deadlock is not an error.
pub fn run_deadlock_with(
    log: &Arc<EventLog>,
    wait_timeout: Duration,
    hold_delay: Duration,
) -> Result<DeadlockReport> {
    let lock_a = Arc::new(ExclusiveLock::new("Lock A"));
    let lock_b = Arc::new(ExclusiveLock::new("Lock B"));

    let t1 = spawn_lock_pair(log, "T1", &lock_a, &lock_b, hold_delay)?;
    let t2 = spawn_lock_pair(log, "T2", &lock_b, &lock_a, hold_delay)?;

    t1.wait_timeout(wait_timeout);
    t2.wait_timeout(wait_timeout);

    let mut workers = Vec::with_capacity(2);
    let mut leaked = Vec::new();
    for handle in [t1, t2] {
        let finished = handle.is_finished();
        workers.push(WorkerLiveness {
            name: handle.name().to_string(),
            finished,
        });
        if finished {
            handle.join();
        } else {
            leaked.push(handle.detach());
        }
    }

    let classification = classify_deadlock(&workers);
    match classification {
        Classification::DeadlockDetected => {
            log.append(
                LogTag::Deadlock,
                "Deadlock detected: threads are still waiting for each other.",
            );
            tracing::warn!(
                target: "syncscope::deadlock",
                stuck = ?leaked.iter().map(DetachedWorker::name).collect::<Vec<_>>(),
                wait_timeout_ms = wait_timeout.as_millis() as u64,
                "Deadlock detected; leaving blocked workers running"
            );
        }
        _ => {
            log.append(
                LogTag::Deadlock,
                "No deadlock occurred (locks were acquired successfully).",
            );
            tracing::info!(
                target: "syncscope::deadlock",
                "Deadlock scenario finished without a cycle"
            );
        }
    }

    Ok(DeadlockReport {
        classification,
        workers,
        leaked,
        locks: [lock_a, lock_b],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liveness(t1: bool, t2: bool) -> Vec<WorkerLiveness> {
        vec![
            WorkerLiveness {
                name: "T1".into(),
                finished: t1,
            },
            WorkerLiveness {
                name: "T2".into(),
                finished: t2,
            },
        ]
    }

    #[test]
    fn test_classify_deadlock() {
        assert_eq!(
            classify_deadlock(&liveness(true, true)),
            Classification::NoDeadlock
        );
        assert_eq!(
            classify_deadlock(&liveness(false, true)),
            Classification::DeadlockDetected
        );
        assert_eq!(
            classify_deadlock(&liveness(true, false)),
            Classification::DeadlockDetected
        );
        assert_eq!(
            classify_deadlock(&liveness(false, false)),
            Classification::DeadlockDetected
        );
    }

    #[test]
    fn test_single_worker_alone_never_blocks() {
        let log = EventLog::new();
        let a = ExclusiveLock::new("Lock A");
        let b = ExclusiveLock::new("Lock B");

        lock_pair_worker(&log, "T1", &a, &b, Duration::ZERO);

        assert_eq!(
            log.lines(),
            vec![
                "[T1] Trying to acquire Lock A",
                "[T1] Acquired Lock A",
                "[T1] Trying to acquire Lock B",
                "[T1] Acquired Lock B",
            ]
        );
        assert!(!a.is_held());
        assert!(!b.is_held());
    }

    #[test]
    fn test_classification_matches_liveness() {
        let log = Arc::new(EventLog::new());
        let report =
            run_deadlock_with(&log, Duration::from_millis(500), Duration::from_millis(100))
                .unwrap();

        assert_eq!(report.workers.len(), 2);
        assert_eq!(report.classification, classify_deadlock(&report.workers));
        assert_eq!(report.leaked().len(), report.stuck_workers().len());

        let last = log.lines().pop().unwrap();
        match report.classification {
            Classification::DeadlockDetected => {
                assert_eq!(
                    last,
                    "[DEADLOCK] Deadlock detected: threads are still waiting for each other."
                );
                assert!(!report.leaked().is_empty());
            }
            Classification::NoDeadlock => {
                assert_eq!(
                    last,
                    "[DEADLOCK] No deadlock occurred (locks were acquired successfully)."
                );
                assert!(report.leaked().is_empty());
                assert!(!report.locks()[0].is_held());
                assert!(!report.locks()[1].is_held());
            }
            other => panic!("unexpected classification {}", other),
        }
    }
}
