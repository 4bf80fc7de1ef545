//! Shared counter with a deliberately non-atomic increment
//!
//! `SharedCounter` is a single integer cell. Its increment is a three step
//! read-modify-write sequence: load into a temporary, add one, store the
//! temporary back. Each step is a relaxed atomic access, so concurrent use is
//! memory-safe, but nothing makes the triplet atomic. Two workers that load
//! the same value both store `value + 1` and one increment is lost.
//!
//! Access discipline:
//! - Race scenario: workers call [`SharedCounter::increment_unsynchronized`]
//!   with no coordination.
//! - Sync scenario: every call is bracketed by an
//!   [`ExclusiveLock`](crate::lock::ExclusiveLock) guard, which restores
//!   `value == completed increments` between operations.

use std::sync::atomic::{AtomicU64, Ordering};
use syncscope_core::{Error, Result};

/// A single integer cell shared by reference among one scenario's workers.
#[derive(Debug, Default)]
pub struct SharedCounter {
    value: AtomicU64,
}

impl SharedCounter {
    /// Create a counter at 0.
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Read, increment a local temporary, write back.
    ///
    /// Not atomic as a whole: an update made by another worker between the
    /// load and the store is overwritten.
    #[inline(never)]
    pub fn increment_unsynchronized(&self) {
        let mut temp = self.value.load(Ordering::Relaxed);
        temp = std::hint::black_box(temp) + 1;
        self.value.store(temp, Ordering::Relaxed);
    }
}

/// Validate counter scenario inputs and return `num_threads * iterations`.
pub(crate) fn expected_total(num_threads: usize, iterations: u64) -> Result<u64> {
    if num_threads == 0 {
        return Err(Error::invalid_input("num_threads must be at least 1"));
    }
    if iterations == 0 {
        return Err(Error::invalid_input("iterations must be at least 1"));
    }
    (num_threads as u64).checked_mul(iterations).ok_or_else(|| {
        Error::invalid_input(format!(
            "{} threads x {} iterations overflows the counter",
            num_threads, iterations
        ))
    })
}
