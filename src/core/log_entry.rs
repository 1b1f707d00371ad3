//! Log entry structure
//!
//! A [`LogEntry`] is built once per accepted message, borrowed by every sink
//! during fan-out, and dropped when dispatch returns.

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::cell::OnceCell;

#[derive(Debug, Clone)]
pub struct LogEntry<'a> {
    pub channel: &'a str,
    pub function: Option<&'a str>,
    pub level: LogLevel,
    /// Seconds since the process time origin
    pub time: f32,
    pub message: Cow<'a, str>,
    // Captured by the first sink that asks for wall-clock time
    wall_clock: OnceCell<DateTime<Utc>>,
}

impl<'a> LogEntry<'a> {
    pub fn new(
        channel: &'a str,
        function: Option<&'a str>,
        level: LogLevel,
        time: f32,
        message: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            channel,
            function: function.filter(|f| !f.is_empty()),
            level,
            time,
            message: message.into(),
            wall_clock: OnceCell::new(),
        }
    }

    /// Wall-clock time of the record, read from the system clock on first
    /// use only
    pub fn timestamp(&self) -> DateTime<Utc> {
        *self.wall_clock.get_or_init(Utc::now)
    }

    /// Function name, empty when the call site did not capture one
    pub fn function_name(&self) -> &str {
        self.function.unwrap_or("")
    }

    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so every record stays on one line of a text sink.
    pub fn sanitized_message(&self) -> Cow<'_, str> {
        if !self.message.contains(['\n', '\r', '\t']) {
            return Cow::Borrowed(&self.message);
        }
        Cow::Owned(
            self.message
                .replace('\n', "\\n")
                .replace('\r', "\\r")
                .replace('\t', "\\t"),
        )
    }

    /// `Channel::function` or just `Channel`
    pub fn origin(&self) -> Cow<'_, str> {
        match self.function {
            Some(function) => Cow::Owned(format!("{}::{}", self.channel, function)),
            None => Cow::Borrowed(self.channel),
        }
    }

    /// Timestamp prefix including brackets, e.g. `[    1.2500] `
    pub fn timestamp_prefix(&self, format: &TimestampFormat) -> String {
        format!("[{}] ", format.format(self.time, || self.timestamp()))
    }

    /// Plain single-line rendering used by the file and debug sinks:
    /// `[   12.3456] E(Channel::function): message`
    pub fn to_text_line(&self, timestamps: Option<&TimestampFormat>) -> String {
        let prefix = timestamps
            .map(|format| self.timestamp_prefix(format))
            .unwrap_or_default();
        format!(
            "{}{}({}): {}",
            prefix,
            self.level.to_char(),
            self.origin(),
            self.sanitized_message()
        )
    }
}
