//! Core types for syncscope
//!
//! This crate defines the pieces shared by every scenario and collaborator:
//! - EventLog: append-only, tagged log shared across a session
//! - Classification / CounterOutcome: what a scenario observed
//! - ScenarioConfig: scenario parameters loaded from `syncscope.toml`
//! - report: plain-text persistence of the log
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod event_log;
pub mod outcome;
pub mod report;

pub use config::{ScenarioConfig, CONFIG_FILE_NAME, DEFAULT_REPORT_PATH};
pub use error::{Error, Result};
pub use event_log::{EventLog, LogEntry, LogSink, LogTag};
pub use outcome::{Classification, CounterOutcome};
pub use report::{render_report, save_report, write_lines};
