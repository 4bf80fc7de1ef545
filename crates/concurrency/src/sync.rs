//! Lock-protected increment scenario
//!
//! Same worker shape as the race scenario, but every read-modify-write
//! triplet runs under scoped acquisition of one shared [`ExclusiveLock`].
//! The guard brackets exactly the triplet, not the loop around it. The final
//! value must equal `N * M`; a mismatch means the lock itself is broken and is
//! reported as an anomaly.

use crate::counter::{expected_total, SharedCounter};
use crate::lock::ExclusiveLock;
use crate::worker::{join_all, spawn_pool};
use std::sync::Arc;
use std::time::Instant;
use syncscope_core::{Classification, CounterOutcome, EventLog, LogTag, Result};

fn sync_worker(counter: &SharedCounter, lock: &ExclusiveLock, iterations: u64) {
    for _ in 0..iterations {
        let _guard = lock.acquire();
        counter.increment_unsynchronized();
    }
}

/// Classify a finished sync run.
pub fn classify_sync(expected: u64, actual: u64) -> Classification {
    if actual == expected {
        Classification::SyncSuccess
    } else {
        Classification::SyncMismatch
    }
}

/// Run the sync scenario and append its two summary lines to `log`.
///
/// Waits for all workers unconditionally. A mismatch is logged and traced at
/// error level but is not returned as an `Err`.
///
/// # Errors
///
/// Returns `Error::InvalidInput` for zero threads or iterations and
/// `Error::Io` if a worker thread cannot be spawned.
pub fn run_sync(log: &EventLog, num_threads: usize, iterations: u64) -> Result<CounterOutcome> {
    let expected = expected_total(num_threads, iterations)?;
    let counter = Arc::new(SharedCounter::new());
    let lock = Arc::new(ExclusiveLock::new("Counter Lock"));
    let started = Instant::now();

    let handles = spawn_pool(num_threads, |_| {
        let counter = Arc::clone(&counter);
        let lock = Arc::clone(&lock);
        move || sync_worker(&counter, &lock, iterations)
    })?;
    join_all(handles);

    let actual = counter.get();
    let classification = classify_sync(expected, actual);

    log.append(
        LogTag::Sync,
        format!("Expected = {}, Actual = {}", expected, actual),
    );
    if classification == Classification::SyncSuccess {
        log.append(
            LogTag::Sync,
            "Synchronization successful. No race condition.",
        );
        tracing::info!(
            target: "syncscope::sync",
            num_threads,
            iterations,
            expected,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Sync scenario finished"
        );
    } else {
        log.append(
            LogTag::Sync,
            "Something is wrong. Value mismatch even with lock!",
        );
        tracing::error!(
            target: "syncscope::sync",
            num_threads,
            iterations,
            expected,
            actual,
            "Lock-protected counter lost updates"
        );
    }

    Ok(CounterOutcome {
        classification,
        expected,
        actual,
    })
}
