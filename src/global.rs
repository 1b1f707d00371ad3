//! Process-wide logger
//!
//! The global [`Logger`] is a `static` with const-initialized defaults:
//! threshold `Info`, no channel filter, no sinks. Call [`init`] (or
//! [`init_with`]) once before starting producer threads to pin the process
//! time origin and enable the console.
//!
//! Every function here forwards to the global logger; see the matching
//! [`Logger`] method for details.

use crate::appenders::{CallbackFunction, UserParam};
use crate::core::{
    timestamp::pin_process_start, Appender, LogConfig, LogLevel, Logger, LoggerMetrics, Result,
    TimestampFormat,
};
use std::fmt;
use std::path::Path;

static LOGGER: Logger = Logger::new();

/// The process-wide logger
#[inline(always)]
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// Enable timestamped console output and apply the `LOG_*` environment
/// overrides.
///
/// # Example
///
/// ```
/// rust_channel_logger::init().unwrap();
/// assert!(rust_channel_logger::is_console_output_enabled());
/// ```
pub fn init() -> Result<()> {
    let config = LogConfig::default()
        .with_console(true, true)
        .with_env_overrides()?;
    init_with(&config)
}

/// Apply `config` to the global logger
pub fn init_with(config: &LogConfig) -> Result<()> {
    pin_process_start();
    LOGGER.apply_config(config)
}

pub fn level() -> LogLevel {
    LOGGER.level()
}

pub fn set_level(level: LogLevel) {
    LOGGER.set_level(level);
}

pub fn set_filter(pattern: &str) -> Result<()> {
    LOGGER.set_filter(pattern)
}

pub fn filter() -> String {
    LOGGER.filter()
}

pub fn is_visible(level: LogLevel, channel: &str) -> bool {
    LOGGER.is_visible(level, channel)
}

pub fn write(channel: &str, level: LogLevel, message: &str) {
    LOGGER.write(channel, level, message);
}

pub fn write_with_function(channel: &str, function: &str, level: LogLevel, message: &str) {
    LOGGER.write_with_function(channel, Some(function), level, message);
}

pub fn write_fmt_args(channel: &str, function: Option<&str>, level: LogLevel, args: fmt::Arguments<'_>) {
    LOGGER.write_fmt_args(channel, function, level, args);
}

pub fn set_console_output(enabled: bool, timestamps: bool) {
    LOGGER.set_console_output(enabled, timestamps);
}

pub fn is_console_output_enabled() -> bool {
    LOGGER.is_console_output_enabled()
}

pub fn set_debug_output(enabled: bool) {
    LOGGER.set_debug_output(enabled);
}

pub fn is_debug_output_enabled() -> bool {
    LOGGER.is_debug_output_enabled()
}

pub fn set_file_output(enabled: bool, path: impl AsRef<Path>, timestamps: bool) -> Result<()> {
    LOGGER.set_file_output(enabled, path, timestamps)
}

pub fn is_file_output_enabled() -> bool {
    LOGGER.is_file_output_enabled()
}

pub fn set_timestamp_format(format: TimestampFormat) {
    LOGGER.set_timestamp_format(format);
}

/// Register a callback sink.
///
/// The logger keeps only the `(function, user)` pair. Whatever `user`
/// refers to must outlive the registration: unregister before dropping it.
pub fn register_callback(function: CallbackFunction, user: UserParam) {
    LOGGER.register_callback(function, user);
}

pub fn unregister_callback(function: CallbackFunction, user: UserParam) {
    LOGGER.unregister_callback(function, user);
}

pub fn add_appender(appender: Box<dyn Appender>) {
    LOGGER.add_appender(appender);
}

pub fn remove_appender(name: &str) -> bool {
    LOGGER.remove_appender(name)
}

pub fn metrics() -> &'static LoggerMetrics {
    LOGGER.metrics()
}

pub fn flush() -> Result<()> {
    LOGGER.flush()
}
