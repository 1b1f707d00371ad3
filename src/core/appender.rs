//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// An output sink. Appenders are only ever called with the registry lock
/// held, so implementations need no synchronization of their own.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry<'_>) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
