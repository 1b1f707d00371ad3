//! Shared helpers for tests that touch the process-wide logger

#![allow(dead_code)]

use parking_lot::{Mutex, MutexGuard};
use rust_channel_logger::{
    Appender, CallbackFunction, LogConfig, LogEntry, LogLevel, Result, UserParam,
};
use std::io::Write;
use std::sync::Arc;

static GLOBAL_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// One record as seen by a [`CaptureAppender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub channel: String,
    pub function: Option<String>,
    pub level: LogLevel,
    pub message: String,
}

pub type CaptureBuffer = Arc<Mutex<Vec<Captured>>>;

pub struct CaptureAppender {
    records: CaptureBuffer,
}

impl CaptureAppender {
    pub const NAME: &'static str = "capture";

    pub fn new() -> (Self, CaptureBuffer) {
        let records = CaptureBuffer::default();
        (
            Self {
                records: Arc::clone(&records),
            },
            records,
        )
    }
}

impl Appender for CaptureAppender {
    fn append(&mut self, entry: &LogEntry<'_>) -> Result<()> {
        self.records.lock().push(Captured {
            channel: entry.channel.to_string(),
            function: entry.function.map(str::to_string),
            level: entry.level,
            message: entry.message.to_string(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

/// Serialize access to the global logger and reset it to its defaults:
/// threshold `Info`, no filter, no built-in sinks, no capture appenders.
pub fn exclusive_logger() -> MutexGuard<'static, ()> {
    let guard = GLOBAL_LOCK.lock();
    rust_channel_logger::init_with(&LogConfig::default()).expect("default config applies");
    while rust_channel_logger::remove_appender(CaptureAppender::NAME) {}
    guard
}

/// Attach a fresh capture appender to the global logger
pub fn capture() -> CaptureBuffer {
    let (appender, records) = CaptureAppender::new();
    rust_channel_logger::add_appender(Box::new(appender));
    records
}

/// Callback registration on the global logger, undone on drop so a failed
/// assertion never leaves a callback pointing at a dead stack frame
pub struct Registration {
    function: CallbackFunction,
    user: UserParam,
}

impl Drop for Registration {
    fn drop(&mut self) {
        rust_channel_logger::unregister_callback(self.function, self.user);
    }
}

pub fn register(function: CallbackFunction, user: UserParam) -> Registration {
    rust_channel_logger::register_callback(function, user);
    Registration { function, user }
}

/// In-memory stream for console output
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
