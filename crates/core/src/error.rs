//! Error types for syncscope
//!
//! Scenarios themselves never fail: a detected race or deadlock is a
//! successful demonstration. The errors here cover the surrounding
//! plumbing (configuration, menu input, report persistence, thread spawn).
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for syncscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for syncscope
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (report writes, config reads, thread spawn)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A parameter is outside its accepted range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Menu selection outside the accepted set
    #[error("Invalid choice: {0:?}")]
    InvalidChoice(String),
}

impl Error {
    /// Build a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config(reason.into())
    }

    /// Build an invalid-input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput(reason.into())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
