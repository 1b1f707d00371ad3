//! File appender implementation
//!
//! The target is truncated when the appender is created. Records are
//! buffered; error and warning records flush the buffer immediately.

use crate::core::{Appender, LogEntry, LoggerError, Result, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
    timestamps: bool,
    timestamp_format: TimestampFormat,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>, timestamps: bool) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| LoggerError::file_open(&path, e))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timestamps,
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_channel_logger::appenders::FileAppender;
    /// use rust_channel_logger::TimestampFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log", true)
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    /// Change the timestamp setting without reopening the file
    pub fn set_timestamps(&mut self, timestamps: bool) {
        self.timestamps = timestamps;
    }

    pub fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry<'_>) -> Result<()> {
        let mut output = entry.to_text_line(self.timestamps.then_some(&self.timestamp_format));
        output.push('\n');

        self.writer.write_all(output.as_bytes())?;
        if entry.level.is_diagnostic() {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_truncates_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("truncate.log");
        fs::write(&path, "stale contents\n").unwrap();

        let mut appender = FileAppender::new(&path, false).unwrap();
        let entry = LogEntry::new("Disk", None, LogLevel::Info, 0.0, "fresh");
        appender.append(&entry).unwrap();
        appender.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "I(Disk): fresh\n");
    }

    #[test]
    fn test_timestamp_prefix() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("stamped.log");

        let mut appender = FileAppender::new(&path, true).unwrap();
        let entry = LogEntry::new("Disk", Some("mount"), LogLevel::Error, 4.5, "no media");
        appender.append(&entry).unwrap();

        // Error records are flushed without an explicit flush call
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[    4.5000] E(Disk::mount): no media\n"
        );
    }

    #[test]
    fn test_open_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("dir").join("x.log");

        let err = FileAppender::new(&path, true).err().expect("open should fail");
        assert!(matches!(err, LoggerError::FileOpen { .. }));
    }
}
