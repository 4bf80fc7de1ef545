//! Console echo for the session log.

use syncscope_core::{LogEntry, LogSink};

/// Prints every appended log line to stdout as it happens.
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn emit(&self, entry: &LogEntry) {
        println!("{}", entry.line());
    }
}
