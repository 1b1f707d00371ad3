//! # Rust Channel Logger
//!
//! A process-wide, low-overhead logging facility. Messages carry a channel
//! name and a severity; a global threshold and a channel filter decide what
//! is emitted, and accepted messages fan out to the active sinks.
//!
//! ## Features
//!
//! - **Cheap Rejection**: one atomic load and one comparison before any
//!   argument is evaluated
//! - **Channel Filtering**: exact names, `Prefix*` wildcards and `-Exclusions`
//! - **Multiple Sinks**: console, debug console, file, callbacks and custom
//!   appenders
//! - **Thread Safe**: synchronous delivery under a single registry lock
//!
//! ```
//! use rust_channel_logger::{error_log, info_log, log_channel, LogLevel};
//!
//! log_channel!(Net);
//!
//! rust_channel_logger::init().unwrap();
//! rust_channel_logger::set_level(LogLevel::Warning);
//!
//! info_log!("not shown");
//! error_log!("connect failed: {}", "timeout");
//! ```

pub mod appenders;
pub mod core;
mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{
        CallbackFunction, ConsoleAppender, DebugConsoleAppender, FileAppender, UserParam,
    };
    pub use crate::core::{
        Appender, ChannelFilter, LogConfig, LogEntry, LogLevel, Logger, LoggerError,
        LoggerMetrics, Result, TimestampFormat,
    };
    pub use crate::{
        debug_log, dev_log, error_log, info_log, log_channel, log_to, log_write, trace_log,
        verbose_log, warning_log,
    };
}

pub use crate::appenders::{
    is_console_output_currently_available, CallbackFunction, ConsoleAppender,
    DebugConsoleAppender, FileAppender, UserParam,
};
pub use crate::core::{
    current_message_time, Appender, ChannelFilter, ConsoleConfig, FileConfig, LogConfig,
    LogEntry, LogLevel, Logger, LoggerError, LoggerMetrics, Result, TimestampFormat,
    DEFAULT_LEVEL, LOG_SELF_CHANNEL,
};
pub use crate::global::{
    add_appender, filter, flush, init, init_with, is_console_output_enabled,
    is_debug_output_enabled, is_file_output_enabled, is_visible, level, logger, metrics,
    register_callback, remove_appender, set_console_output, set_debug_output, set_file_output,
    set_filter, set_level, set_timestamp_format, unregister_callback, write, write_fmt_args,
    write_with_function,
};
