//! Main logger implementation
//!
//! The [`Logger`] owns the global threshold, the channel filter, the sink
//! registry and the metrics. Every field is const-initialized, so a logger
//! can live in a `static` without lazy initialization.
//!
//! Pipeline for every message:
//!
//! 1. severity check against the threshold (one atomic load, one compare)
//! 2. channel filter check
//! 3. formatting, if the message is not pre-formatted
//! 4. timestamping and construction of the [`LogEntry`]
//! 5. fan-out to the sink registry

use super::{
    appender::Appender,
    channel_filter::ChannelFilter,
    config::LogConfig,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink_registry::SinkRegistry,
    timestamp::{current_message_time, TimestampFormat},
};
use crate::appenders::{CallbackFunction, UserParam};
use parking_lot::RwLock;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Channel used for the logger's own diagnostics
pub const LOG_SELF_CHANNEL: &str = "Log";

/// Threshold of a freshly constructed logger
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Info;

pub struct Logger {
    threshold: AtomicU8,
    filter_active: AtomicBool,
    filter: RwLock<ChannelFilter>,
    sinks: SinkRegistry,
    /// Metrics for observability (delivered, filtered, failed)
    metrics: LoggerMetrics,
}

impl Logger {
    /// A logger at [`DEFAULT_LEVEL`] with no channel filter and no sinks
    #[must_use]
    pub const fn new() -> Self {
        Self {
            threshold: AtomicU8::new(DEFAULT_LEVEL as u8),
            filter_active: AtomicBool::new(false),
            filter: parking_lot::const_rwlock(ChannelFilter::empty()),
            sinks: SinkRegistry::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Fast-path guard: is `level` at or below the threshold?
    ///
    /// [`LogLevel::None`] is never visible. Subtracting one maps `None` to
    /// 255, so the single comparison covers both conditions.
    #[inline(always)]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        (level as u8).wrapping_sub(1) < self.threshold.load(Ordering::Relaxed)
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    /// Replace the channel filter.
    ///
    /// A malformed pattern disables channel filtering entirely, emits a
    /// warning through the active sinks and returns the parse error.
    pub fn set_filter(&self, pattern: &str) -> Result<()> {
        match ChannelFilter::parse(pattern) {
            Ok(filter) => {
                self.install_filter(filter);
                Ok(())
            }
            Err(e) => {
                self.install_filter(ChannelFilter::empty());
                self.write_fmt_args(
                    LOG_SELF_CHANNEL,
                    None,
                    LogLevel::Warning,
                    format_args!("{}; channel filtering disabled", e),
                );
                Err(e)
            }
        }
    }

    fn install_filter(&self, filter: ChannelFilter) {
        let mut current = self.filter.write();
        self.filter_active.store(!filter.is_empty(), Ordering::Release);
        *current = filter;
    }

    /// The pattern of the current channel filter
    pub fn filter(&self) -> String {
        self.filter.read().pattern().to_string()
    }

    /// Channel filter check; skips the lock while no filter is set
    #[inline]
    pub fn is_channel_enabled(&self, channel: &str) -> bool {
        !self.filter_active.load(Ordering::Acquire) || self.filter.read().matches(channel)
    }

    /// Both the severity and the channel check, without dispatching
    pub fn is_visible(&self, level: LogLevel, channel: &str) -> bool {
        self.is_level_enabled(level) && self.is_channel_enabled(channel)
    }

    /// Write a pre-formatted message
    pub fn write(&self, channel: &str, level: LogLevel, message: &str) {
        self.write_with_function(channel, None, level, message);
    }

    /// Write a pre-formatted message tagged with the calling function
    pub fn write_with_function(
        &self,
        channel: &str,
        function: Option<&str>,
        level: LogLevel,
        message: &str,
    ) {
        if !self.is_level_enabled(level) {
            return;
        }
        if !self.passes_filter(channel) {
            return;
        }
        self.dispatch(channel, function, level, Cow::Borrowed(message));
    }

    /// Write a message formatted from `args`, only once it is known to be
    /// visible. A `Display` implementation that fails panics here, at the
    /// call site.
    pub fn write_fmt_args(
        &self,
        channel: &str,
        function: Option<&str>,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) {
        if !self.is_level_enabled(level) {
            return;
        }
        if !self.passes_filter(channel) {
            return;
        }
        let message = match args.as_str() {
            Some(literal) => Cow::Borrowed(literal),
            None => Cow::Owned(fmt::format(args)),
        };
        self.dispatch(channel, function, level, message);
    }

    fn passes_filter(&self, channel: &str) -> bool {
        let allowed = self.is_channel_enabled(channel);
        if !allowed {
            self.metrics.record_filtered();
        }
        allowed
    }

    fn dispatch(&self, channel: &str, function: Option<&str>, level: LogLevel, message: Cow<'_, str>) {
        let entry = LogEntry::new(channel, function, level, current_message_time(), message);
        self.sinks.dispatch(&entry, &self.metrics);
    }

    pub fn set_console_output(&self, enabled: bool, timestamps: bool) {
        self.sinks.set_console_output(enabled, timestamps);
    }

    pub fn set_debug_output(&self, enabled: bool) {
        self.sinks.set_debug_output(enabled);
    }

    /// Enable or disable the file sink. The file is truncated on open.
    ///
    /// If the file cannot be opened the sink stays disabled, an error record
    /// is written to the remaining sinks, and the error is returned here
    /// only; later logging calls are unaffected.
    pub fn set_file_output(
        &self,
        enabled: bool,
        path: impl AsRef<Path>,
        timestamps: bool,
    ) -> Result<()> {
        let path = path.as_ref();
        let target = (!path.as_os_str().is_empty()).then_some(path);

        let result = self.sinks.set_file_output(enabled, target, timestamps);
        if let Err(ref e) = result {
            self.write_fmt_args(
                LOG_SELF_CHANNEL,
                None,
                LogLevel::Error,
                format_args!("{}", e),
            );
        }
        result
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        self.sinks.set_timestamp_format(format);
    }

    /// Register a callback sink. Registering the same pair twice is a no-op.
    ///
    /// The logger does not own whatever `user` points to: the caller must
    /// unregister the callback before that object is destroyed.
    pub fn register_callback(&self, function: CallbackFunction, user: UserParam) {
        self.sinks.register_callback(function, user);
    }

    /// Unregister a callback sink. Unknown pairs are ignored.
    pub fn unregister_callback(&self, function: CallbackFunction, user: UserParam) {
        self.sinks.unregister_callback(function, user);
    }

    /// Register a custom appender after the existing sinks
    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.sinks.add_appender(appender);
    }

    /// Remove a custom appender by name
    pub fn remove_appender(&self, name: &str) -> bool {
        self.sinks.remove_appender(name)
    }

    pub fn is_console_output_enabled(&self) -> bool {
        self.sinks.is_console_output_enabled()
    }

    pub fn is_debug_output_enabled(&self) -> bool {
        self.sinks.is_debug_output_enabled()
    }

    pub fn is_file_output_enabled(&self) -> bool {
        self.sinks.is_file_output_enabled()
    }

    /// Names of the active sinks in delivery order
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.sink_names()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_channel_logger::{Logger, LogLevel};
    ///
    /// let logger = Logger::new();
    /// logger.set_filter("Net").unwrap();
    /// logger.write("Disk", LogLevel::Error, "dropped by the filter");
    ///
    /// assert_eq!(logger.metrics().filtered_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.sinks.flush()
    }

    /// Apply every setting of `config`.
    ///
    /// All settings are applied even if one fails; the first error is
    /// returned.
    pub fn apply_config(&self, config: &LogConfig) -> Result<()> {
        let mut first_error: Option<LoggerError> = None;

        self.set_timestamp_format(config.timestamp_format.clone());
        self.set_level(config.level);
        if let Err(e) = self.set_filter(&config.filter) {
            first_error.get_or_insert(e);
        }
        self.set_console_output(config.console.enabled, config.console.timestamps);
        self.set_debug_output(config.debug_output);

        let file_path = config.file.path.as_deref().unwrap_or(Path::new(""));
        if let Err(e) = self.set_file_output(config.file.enabled, file_path, config.file.timestamps) {
            first_error.get_or_insert(e);
        }

        first_error.map_or(Ok(()), Err)
    }

    #[inline]
    pub fn error(&self, channel: &str, message: &str) {
        self.write(channel, LogLevel::Error, message);
    }

    #[inline]
    pub fn warning(&self, channel: &str, message: &str) {
        self.write(channel, LogLevel::Warning, message);
    }

    #[inline]
    pub fn info(&self, channel: &str, message: &str) {
        self.write(channel, LogLevel::Info, message);
    }

    #[inline]
    pub fn verbose(&self, channel: &str, message: &str) {
        self.write(channel, LogLevel::Verbose, message);
    }

    #[inline]
    pub fn dev(&self, channel: &str, message: &str) {
        self.write(channel, LogLevel::Dev, message);
    }

    #[inline]
    pub fn debug(&self, channel: &str, message: &str) {
        self.write(channel, LogLevel::Debug, message);
    }

    #[inline]
    pub fn trace(&self, channel: &str, message: &str) {
        self.write(channel, LogLevel::Trace, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}
