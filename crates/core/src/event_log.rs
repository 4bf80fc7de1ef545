//! Append-only event log shared by all scenarios in a session
//!
//! Every notable event (lock attempt, lock acquired, scenario summary,
//! scenario classification) becomes one entry. Entries are never removed or
//! reordered; the rendered lines are what the report writer persists.
//!
//! The log is passed around as `Arc<EventLog>`. Appends are serialized by an
//! internal mutex, so worker threads of one scenario may log concurrently and
//! the sequence numbers still match emission order.

use chrono::Utc;
use parking_lot::Mutex;
use std::fmt;

/// Source tag of a log entry, rendered as the `[TAG]` prefix of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTag {
    /// Unsynchronized counter scenario
    Race,
    /// Lock-protected counter scenario
    Sync,
    /// Two-lock ordering inversion scenario
    Deadlock,
    /// A named worker thread ("T1", "T2", ...)
    Worker(String),
}

impl fmt::Display for LogTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTag::Race => f.write_str("RACE"),
            LogTag::Sync => f.write_str("SYNC"),
            LogTag::Deadlock => f.write_str("DEADLOCK"),
            LogTag::Worker(name) => f.write_str(name),
        }
    }
}

/// A single immutable log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Position in the log, starting at 0
    pub sequence: u64,
    /// Microseconds since the Unix epoch at append time
    pub timestamp: u64,
    /// Who emitted the entry
    pub tag: LogTag,
    /// Free-form message text
    pub message: String,
}

impl LogEntry {
    /// Render the entry as a report line (without trailing newline).
    pub fn line(&self) -> String {
        format!("[{}] {}", self.tag, self.message)
    }
}

/// Receives each entry as it is appended.
///
/// Called while the log's append lock is held, so sinks observe entries in
/// exactly the order they are stored. Implementations must not append to the
/// same log.
pub trait LogSink: Send + Sync {
    /// Handle one freshly appended entry
    fn emit(&self, entry: &LogEntry);
}

/// Ordered, append-only sequence of tagged lines.
pub struct EventLog {
    entries: Mutex<Vec<LogEntry>>,
    sink: Option<Box<dyn LogSink>>,
}

impl EventLog {
    /// Create an empty log with no sink.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            sink: None,
        }
    }

    /// Create an empty log that forwards every entry to `sink`.
    pub fn with_sink(sink: impl LogSink + 'static) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            sink: Some(Box::new(sink)),
        }
    }

    /// Append an entry and return its sequence number.
    pub fn append(&self, tag: LogTag, message: impl Into<String>) -> u64 {
        let mut entries = self.entries.lock();
        let sequence = entries.len() as u64;
        let entry = LogEntry {
            sequence,
            timestamp: Utc::now().timestamp_micros().max(0) as u64,
            tag,
            message: message.into(),
        };
        tracing::trace!(target: "syncscope::log", sequence, line = %entry.line(), "append");
        if let Some(sink) = &self.sink {
            sink.emit(&entry);
        }
        entries.push(entry);
        sequence
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Snapshot of all entries in emission order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Snapshot of all rendered lines in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(LogEntry::line).collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("len", &self.len())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    struct CollectSink(Arc<Mutex<Vec<String>>>);

    impl LogSink for CollectSink {
        fn emit(&self, entry: &LogEntry) {
            self.0.lock().push(entry.line());
        }
    }

    #[test]
    fn test_append_renders_tag_prefix() {
        let log = EventLog::new();
        log.append(LogTag::Race, "Expected = 10, Actual = 7");
        log.append(LogTag::Worker("T1".into()), "Acquired Lock A");

        assert_eq!(
            log.lines(),
            vec![
                "[RACE] Expected = 10, Actual = 7".to_string(),
                "[T1] Acquired Lock A".to_string(),
            ]
        );
    }

    #[test]
    fn test_sequence_numbers_follow_emission_order() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.append(LogTag::Sync, "a"), 0);
        assert_eq!(log.append(LogTag::Sync, "b"), 1);
        assert_eq!(log.append(LogTag::Deadlock, "c"), 2);

        let seqs: Vec<u64> = log.entries().iter().map(|e| e.sequence).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_timestamps_are_non_decreasing() {
        let log = EventLog::new();
        for i in 0..50 {
            log.append(LogTag::Race, format!("line {}", i));
        }
        let entries = log.entries();
        for pair in entries.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_sink_sees_every_entry_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = EventLog::with_sink(CollectSink(Arc::clone(&seen)));

        log.append(LogTag::Deadlock, "first");
        log.append(LogTag::Worker("T2".into()), "second");

        assert_eq!(*seen.lock(), log.lines());
    }

    #[test]
    fn test_concurrent_appends_keep_all_entries() {
        let log = Arc::new(EventLog::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..250 {
                        log.append(LogTag::Worker(format!("T{}", t + 1)), format!("{}", i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let entries = log.entries();
        assert_eq!(entries.len(), 1000);
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.sequence, i as u64);
        }
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(LogTag::Race.to_string(), "RACE");
        assert_eq!(LogTag::Sync.to_string(), "SYNC");
        assert_eq!(LogTag::Deadlock.to_string(), "DEADLOCK");
        assert_eq!(LogTag::Worker("T7".into()).to_string(), "T7");
    }
}
