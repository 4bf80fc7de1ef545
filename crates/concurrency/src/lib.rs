//! Concurrency scenarios for syncscope
//!
//! This crate implements the scenario engine:
//! - SharedCounter: integer cell with a non-atomic read-modify-write increment
//! - ExclusiveLock: named mutex with scoped acquisition
//! - Workers: named threads with a bounded-wait completion signal
//! - Race / Sync / Deadlock scenarios and their classification
//! - ScenarioRunner: maps menu selections to scenarios

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counter;
pub mod deadlock;
pub mod lock;
pub mod race;
pub mod runner;
pub mod sync;
pub mod worker;

pub use counter::SharedCounter;
pub use deadlock::{
    classify_deadlock, run_deadlock, run_deadlock_with, DeadlockReport, WorkerLiveness,
    DEFAULT_HOLD_DELAY, DEFAULT_WAIT_TIMEOUT,
};
pub use lock::{ExclusiveLock, LockGuard};
pub use race::{classify_race, run_race, DEFAULT_ITERATIONS, DEFAULT_NUM_THREADS};
pub use runner::{Dispatch, MenuChoice, ScenarioRunner};
pub use sync::{classify_sync, run_sync};
pub use worker::{spawn_worker, CompletionSignal, DetachedWorker, WorkerHandle};
