//! Scenario configuration via `syncscope.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! classic demonstration parameters: 5 workers, 100000 increments each, a
//! 5 second bounded wait and a 1 second hold between lock acquisitions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "syncscope.toml";

/// Default report file name.
pub const DEFAULT_REPORT_PATH: &str = "report.txt";

fn default_num_threads() -> usize {
    5
}

fn default_iterations() -> u64 {
    100_000
}

fn default_wait_timeout_ms() -> u64 {
    5_000
}

fn default_hold_delay_ms() -> u64 {
    1_000
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

/// Parameters for all three scenarios and the report writer.
///
/// # Example
///
/// ```toml
/// num_threads = 5
/// iterations = 100000
/// wait_timeout_ms = 5000
/// hold_delay_ms = 1000
/// report_path = "report.txt"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Workers spawned by the race and sync scenarios.
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
    /// Increments performed by each worker.
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Bounded wait per deadlock worker, in milliseconds.
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
    /// Pause between the first and second lock acquisition, in milliseconds.
    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,
    /// Where persist-and-exit writes the report.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            num_threads: default_num_threads(),
            iterations: default_iterations(),
            wait_timeout_ms: default_wait_timeout_ms(),
            hold_delay_ms: default_hold_delay_ms(),
            report_path: default_report_path(),
        }
    }
}

impl ScenarioConfig {
    /// Bounded wait per deadlock worker.
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// Hold delay between lock acquisitions.
    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `num_threads` or `iterations` is zero,
    /// or if `wait_timeout_ms` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(Error::invalid_input("num_threads must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(Error::invalid_input("iterations must be at least 1"));
        }
        if self.wait_timeout_ms == 0 {
            return Err(Error::invalid_input("wait_timeout_ms must be positive"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# syncscope configuration
#
# Workers spawned by the race and sync scenarios (default: 5)
num_threads = 5

# Increments performed by each worker (default: 100000)
iterations = 100000

# How long the deadlock scenario waits for each worker, in ms (default: 5000)
wait_timeout_ms = 5000

# Pause between first and second lock acquisition, in ms (default: 1000)
hold_delay_ms = 1000

# Report written by "Save Report and Exit" (default: report.txt)
report_path = "report.txt"
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ScenarioConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(true)` if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml())?;
        Ok(true)
    }
}
