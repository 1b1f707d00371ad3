//! Log level definitions
//!
//! Levels are ordered from least to most verbose. A message is visible when
//! its level is at or below the current threshold. [`LogLevel::None`] is only
//! meaningful as a threshold and silences all output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum LogLevel {
    /// Silences all log traffic
    None = 0,
    Error = 1,
    Warning = 2,
    #[default]
    Info = 3,
    Verbose = 4,
    Dev = 5,
    Debug = 6,
    Trace = 7,
}

impl LogLevel {
    /// Every level, in ordinal order.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::None,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Verbose,
        LogLevel::Dev,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::None => "NONE",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Dev => "DEV",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Single-character tag used by the text sinks
    pub fn to_char(&self) -> char {
        match self {
            LogLevel::None => 'X',
            LogLevel::Error => 'E',
            LogLevel::Warning => 'W',
            LogLevel::Info => 'I',
            LogLevel::Verbose => 'V',
            LogLevel::Dev => 'D',
            LogLevel::Debug => 'B',
            LogLevel::Trace => 'T',
        }
    }

    /// Convert a raw ordinal back into a level. Out-of-range values saturate
    /// to [`LogLevel::Trace`].
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::None,
            1 => LogLevel::Error,
            2 => LogLevel::Warning,
            3 => LogLevel::Info,
            4 => LogLevel::Verbose,
            5 => LogLevel::Dev,
            6 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Error and warning records go to stderr on the console sink.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Warning)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::None => White,
            LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Info => White,
            LogLevel::Verbose => BrightWhite,
            LogLevel::Dev => Green,
            LogLevel::Debug => Blue,
            LogLevel::Trace => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" | "OFF" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "VERBOSE" => Ok(LogLevel::Verbose),
            "DEV" => Ok(LogLevel::Dev),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
