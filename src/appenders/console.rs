//! Console appender implementation

use crate::core::{Appender, LogEntry, Result, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{IsTerminal, Write};

type ConsoleWriter = Box<dyn Write + Send + Sync>;

pub struct ConsoleAppender {
    stdout: ConsoleWriter,
    stderr: ConsoleWriter,
    timestamps: bool,
    stdout_colors: bool,
    stderr_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender {
    /// Write to the process stdout and stderr. Each stream is colored only
    /// when it is attached to a terminal.
    pub fn new(timestamps: bool) -> Self {
        let colors = cfg!(feature = "console");
        Self {
            stdout: Box::new(std::io::stdout()),
            stderr: Box::new(std::io::stderr()),
            timestamps,
            stdout_colors: colors && std::io::stdout().is_terminal(),
            stderr_colors: colors && std::io::stderr().is_terminal(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Write to the given streams instead, without colors. Error and warning
    /// records go to `stderr`, everything else to `stdout`.
    pub fn with_writers<O, E>(stdout: O, stderr: E, timestamps: bool) -> Self
    where
        O: Write + Send + Sync + 'static,
        E: Write + Send + Sync + 'static,
    {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
            timestamps,
            stdout_colors: false,
            stderr_colors: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Force colors on or off for both streams
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.stdout_colors = use_colors;
        self.stderr_colors = use_colors;
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_channel_logger::appenders::ConsoleAppender;
    /// use rust_channel_logger::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new(true)
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    pub fn set_timestamps(&mut self, timestamps: bool) {
        self.timestamps = timestamps;
    }

    pub fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }

    /// Format as text, colored when the target stream allows it
    fn format_text(&self, entry: &LogEntry<'_>) -> String {
        let timestamp_format = self.timestamps.then_some(&self.timestamp_format);
        let use_colors = if entry.level.is_diagnostic() {
            self.stderr_colors
        } else {
            self.stdout_colors
        };
        if !use_colors {
            return entry.to_text_line(timestamp_format);
        }

        let prefix = timestamp_format
            .map(|format| entry.timestamp_prefix(format))
            .unwrap_or_default();
        let tag = format!("{}({}):", entry.level.to_char(), entry.origin());

        format!("{}{} {}", prefix, colorize(&tag, entry), entry.sanitized_message())
    }
}

#[cfg(feature = "console")]
fn colorize(text: &str, entry: &LogEntry<'_>) -> String {
    text.color(entry.level.color_code()).to_string()
}

#[cfg(not(feature = "console"))]
fn colorize(text: &str, _entry: &LogEntry<'_>) -> String {
    text.to_string()
}

/// Whether stdout is attached to a terminal
pub fn is_console_output_currently_available() -> bool {
    std::io::stdout().is_terminal()
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry<'_>) -> Result<()> {
        let output = self.format_text(entry);

        // Route Error and Warning levels to stderr, others to stdout
        let stream = if entry.level.is_diagnostic() {
            &mut self.stderr
        } else {
            &mut self.stdout
        };
        writeln!(stream, "{}", output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
