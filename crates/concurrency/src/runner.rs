//! Menu dispatcher
//!
//! Maps a discrete selection to one of the three scenarios or to
//! persist-and-exit. The runner owns the session's `Arc<EventLog>` and the
//! scenario parameters; the interactive loop around it lives in the CLI.

use crate::deadlock::{run_deadlock_with, DeadlockReport};
use crate::race::run_race;
use crate::sync::run_sync;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use syncscope_core::{save_report, CounterOutcome, Error, EventLog, Result, ScenarioConfig};

/// A valid menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// "1": unsynchronized counter
    Race,
    /// "2": lock-protected counter
    Sync,
    /// "3": two-lock deadlock
    Deadlock,
    /// "4": write the report and leave the loop
    SaveAndExit,
}

impl MenuChoice {
    /// All choices in menu order.
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Race,
        MenuChoice::Sync,
        MenuChoice::Deadlock,
        MenuChoice::SaveAndExit,
    ];

    /// Menu key.
    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::Race => "1",
            MenuChoice::Sync => "2",
            MenuChoice::Deadlock => "3",
            MenuChoice::SaveAndExit => "4",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Race => "Run Race Condition Scenario (without lock)",
            MenuChoice::Sync => "Run Synchronized Scenario (with lock)",
            MenuChoice::Deadlock => "Run Deadlock Demo",
            MenuChoice::SaveAndExit => "Save Report and Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(MenuChoice::Race),
            "2" => Ok(MenuChoice::Sync),
            "3" => Ok(MenuChoice::Deadlock),
            "4" => Ok(MenuChoice::SaveAndExit),
            other => Err(Error::InvalidChoice(other.to_string())),
        }
    }
}

/// What a dispatched selection produced.
#[derive(Debug)]
pub enum Dispatch {
    /// Race or sync scenario finished
    Counter(CounterOutcome),
    /// Deadlock scenario finished
    Deadlock(DeadlockReport),
    /// Report persisted; the loop should end
    Saved {
        /// Where the report went
        path: PathBuf,
        /// Lines written
        lines: usize,
    },
}

impl Dispatch {
    /// Whether the interactive loop should stop.
    pub fn is_exit(&self) -> bool {
        matches!(self, Dispatch::Saved { .. })
    }
}

/// Runs scenarios against one session log.
#[derive(Debug)]
pub struct ScenarioRunner {
    log: Arc<EventLog>,
    config: ScenarioConfig,
}

impl ScenarioRunner {
    /// Create a runner over `log`.
    pub fn new(log: Arc<EventLog>, config: ScenarioConfig) -> Self {
        Self { log, config }
    }

    /// The session log.
    pub fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    /// Scenario parameters.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Parse `input` and run the selection.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidChoice` for anything but "1".."4", without
    /// touching the log. Otherwise see [`ScenarioRunner::run`].
    pub fn dispatch(&self, input: &str) -> Result<Dispatch> {
        let choice = input.parse::<MenuChoice>()?;
        self.run(choice)
    }

    /// Run one selection.
    ///
    /// # Errors
    ///
    /// Propagates report write failures as `Error::Io`; the loop must not
    /// exit in that case.
    pub fn run(&self, choice: MenuChoice) -> Result<Dispatch> {
        tracing::debug!(target: "syncscope::runner", choice = ?choice, "Dispatching");
        let cfg = &self.config;
        match choice {
            MenuChoice::Race => {
                run_race(&self.log, cfg.num_threads, cfg.iterations).map(Dispatch::Counter)
            }
            MenuChoice::Sync => {
                run_sync(&self.log, cfg.num_threads, cfg.iterations).map(Dispatch::Counter)
            }
            MenuChoice::Deadlock => {
                run_deadlock_with(&self.log, cfg.wait_timeout(), cfg.hold_delay())
                    .map(Dispatch::Deadlock)
            }
            MenuChoice::SaveAndExit => {
                let lines = save_report(&self.log, &cfg.report_path)?;
                Ok(Dispatch::Saved {
                    path: cfg.report_path.clone(),
                    lines,
                })
            }
        }
    }
}
