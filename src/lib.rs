//! syncscope - race, lock and deadlock scenarios on a shared counter
//!
//! Three scenarios demonstrate classic concurrency hazards and classify what
//! they observed:
//!
//! - **Race**: N workers increment a counter with no synchronization; lost
//!   updates leave the total short.
//! - **Sync**: the same workers bracket each increment with a lock; the total
//!   is always exact.
//! - **Deadlock**: two workers take two locks in opposite order; a bounded
//!   wait detects the cycle and leaves the stuck workers running.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use syncscope::{run_race, run_sync, save_report, EventLog};
//!
//! let log = Arc::new(EventLog::new());
//! let race = run_race(&log, 5, 100_000)?;
//! let sync = run_sync(&log, 5, 100_000)?;
//! assert!(race.actual <= race.expected);
//! assert_eq!(sync.actual, sync.expected);
//! save_report(&log, "report.txt".as_ref())?;
//! # Ok::<(), syncscope::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `syncscope-core`: event log, outcomes, configuration, report writer
//! - `syncscope-concurrency`: counter, lock, workers, scenarios, runner

pub use syncscope_concurrency::*;
pub use syncscope_core::*;
