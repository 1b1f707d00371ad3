//! Appender implementations

pub mod callback;
pub mod console;
pub mod debug_console;
pub mod file;

pub use callback::{CallbackAppender, CallbackFunction, UserParam};
pub use console::{is_console_output_currently_available, ConsoleAppender};
pub use debug_console::DebugConsoleAppender;
pub use file::FileAppender;

pub use crate::core::Appender;
