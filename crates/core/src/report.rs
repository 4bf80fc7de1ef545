//! Report persistence
//!
//! Writes every accumulated log line to a plain UTF-8 text file: one line per
//! entry, newline-terminated, in emission order, no header. Any existing file
//! at the target path is overwritten, so writing the same log twice produces
//! byte-identical files.

use crate::error::Result;
use crate::event_log::EventLog;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render lines exactly as they are written to disk.
pub fn render_report<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Write `lines` to `path`, truncating any existing file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be created or written. The error is
/// never swallowed; callers decide whether it is fatal.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Persist the full contents of `log` to `path`.
///
/// Returns the number of lines written.
pub fn save_report(log: &EventLog, path: &Path) -> Result<usize> {
    let lines = log.lines();
    write_lines(path, &lines)?;
    tracing::info!(
        target: "syncscope::report",
        path = %path.display(),
        lines = lines.len(),
        "Report saved"
    );
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event_log::LogTag;
    use tempfile::TempDir;

    fn sample_log() -> EventLog {
        let log = EventLog::new();
        log.append(LogTag::Race, "Expected = 500000, Actual = 231774");
        log.append(LogTag::Race, "Race condition detected! Final value is incorrect.");
        log.append(LogTag::Worker("T1".into()), "Trying to acquire Lock A");
        log
    }

    #[test]
    fn test_report_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        let written = save_report(&sample_log(), &path).unwrap();
        assert_eq!(written, 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "[RACE] Expected = 500000, Actual = 231774\n\
             [RACE] Race condition detected! Final value is incorrect.\n\
             [T1] Trying to acquire Lock A\n"
        );
    }

    #[test]
    fn test_report_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        let log = sample_log();

        save_report(&log, &path).unwrap();
        let first = std::fs::read(&path).unwrap();
        save_report(&log, &path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_report_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "stale line one\nstale line two\nstale line three\nfour\n").unwrap();

        let log = EventLog::new();
        log.append(LogTag::Sync, "Expected = 10, Actual = 10");
        save_report(&log, &path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[SYNC] Expected = 10, Actual = 10\n"
        );
    }

    #[test]
    fn test_empty_log_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        assert_eq!(save_report(&EventLog::new(), &path).unwrap(), 0);
        assert_eq!(std::fs::read(&path).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("report.txt");

        let err = save_report(&sample_log(), &path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_render_matches_written_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        let lines = vec!["a", "b c", "ünïcödé"];

        write_lines(&path, &lines).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), render_report(&lines));
    }
}
