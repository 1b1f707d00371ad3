//! Core logger types and traits

pub mod appender;
pub mod channel_filter;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink_registry;
pub mod timestamp;

pub use appender::Appender;
pub use channel_filter::ChannelFilter;
pub use config::{ConsoleConfig, FileConfig, LogConfig};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, DEFAULT_LEVEL, LOG_SELF_CHANNEL};
pub use metrics::LoggerMetrics;
pub use sink_registry::SinkRegistry;
pub use timestamp::{current_message_time, TimestampFormat};
