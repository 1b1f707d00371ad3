//! Debug console appender
//!
//! Stands in for the platform debugger output channel. Records are written
//! as plain lines without timestamps (the debugger attaches its own) to
//! stderr, or to any writer supplied with [`DebugConsoleAppender::with_writer`].

use crate::core::{Appender, LogEntry, Result};
use std::io::Write;

pub struct DebugConsoleAppender {
    writer: Box<dyn Write + Send + Sync>,
}

impl DebugConsoleAppender {
    pub fn new() -> Self {
        Self::with_writer(std::io::stderr())
    }

    pub fn with_writer<W: Write + Send + Sync + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }
}

impl Default for DebugConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for DebugConsoleAppender {
    fn append(&mut self, entry: &LogEntry<'_>) -> Result<()> {
        let line = entry.to_text_line(None);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "debug"
    }
}
