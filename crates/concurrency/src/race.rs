//! Unsynchronized increment scenario
//!
//! N workers each perform M unsynchronized read-modify-write increments on a
//! fresh [`SharedCounter`]. Lost updates leave the final value below
//! `N * M`; equality is possible but rare and is reported as such.

use crate::counter::{expected_total, SharedCounter};
use crate::worker::{join_all, spawn_pool};
use std::sync::Arc;
use std::time::Instant;
use syncscope_core::{Classification, CounterOutcome, EventLog, LogTag, Result};

/// Default worker count for the counter scenarios.
pub const DEFAULT_NUM_THREADS: usize = 5;

/// Default increments per worker for the counter scenarios.
pub const DEFAULT_ITERATIONS: u64 = 100_000;

fn race_worker(counter: &SharedCounter, iterations: u64) {
    for _ in 0..iterations {
        counter.increment_unsynchronized();
    }
}

/// Classify a finished race run.
pub fn classify_race(expected: u64, actual: u64) -> Classification {
    if actual != expected {
        Classification::RaceDetected
    } else {
        Classification::NoRace
    }
}

/// Run the race scenario and append its two summary lines to `log`.
///
/// Waits for all workers unconditionally.
///
/// # Errors
///
/// Returns `Error::InvalidInput` for zero threads or iterations and
/// `Error::Io` if a worker thread cannot be spawned. Lost updates are not an
/// error.
pub fn run_race(log: &EventLog, num_threads: usize, iterations: u64) -> Result<CounterOutcome> {
    let expected = expected_total(num_threads, iterations)?;
    let counter = Arc::new(SharedCounter::new());
    let started = Instant::now();

    let handles = spawn_pool(num_threads, |_| {
        let counter = Arc::clone(&counter);
        move || race_worker(&counter, iterations)
    })?;
    join_all(handles);

    let actual = counter.get();
    let classification = classify_race(expected, actual);

    log.append(
        LogTag::Race,
        format!("Expected = {}, Actual = {}", expected, actual),
    );
    match classification {
        Classification::RaceDetected => {
            log.append(
                LogTag::Race,
                "Race condition detected! Final value is incorrect.",
            );
        }
        _ => {
            log.append(
                LogTag::Race,
                "No race detected (this is rare but possible).",
            );
        }
    }

    tracing::info!(
        target: "syncscope::race",
        num_threads,
        iterations,
        expected,
        actual,
        lost = expected.saturating_sub(actual),
        elapsed_ms = started.elapsed().as_millis() as u64,
        outcome = %classification,
        "Race scenario finished"
    );

    Ok(CounterOutcome {
        classification,
        expected,
        actual,
    })
}
