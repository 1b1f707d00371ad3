//! Logger configuration
//!
//! A [`LogConfig`] describes the whole logger state: threshold, channel
//! filter, built-in sinks and timestamp format. It can be built in code,
//! read from JSON, and overlaid with environment variables:
//!
//! | Variable     | Effect                                   |
//! |--------------|------------------------------------------|
//! | `LOG_LEVEL`  | threshold (`error`, `warning`, … `none`) |
//! | `LOG_FILTER` | channel filter pattern                   |
//! | `LOG_FILE`   | enables the file sink at this path       |

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FILTER: &str = "LOG_FILTER";
pub const ENV_LOG_FILE: &str = "LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub timestamps: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timestamps: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: Option<PathBuf>,
    pub timestamps: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            timestamps: true,
        }
    }
}

/// Complete logger configuration
///
/// # Example
///
/// ```
/// use rust_channel_logger::{LogConfig, LogLevel};
///
/// let config = LogConfig::from_json(r#"{
///     "level": "Dev",
///     "filter": "Gpu* -GpuShader",
///     "console": { "enabled": true }
/// }"#).unwrap();
///
/// assert_eq!(config.level, LogLevel::Dev);
/// assert!(config.console.enabled);
/// assert!(config.console.timestamps);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub filter: String,
    pub console: ConsoleConfig,
    pub debug_output: bool,
    pub file: FileConfig,
    pub timestamp_format: TimestampFormat,
}

impl LogConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Overlay the `LOG_*` environment variables
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup, using the same keys as
    /// [`LogConfig::with_env_overrides`]. Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.level = level
                .parse()
                .map_err(|message: String| LoggerError::config(ENV_LOG_LEVEL, message))?;
        }
        if let Some(filter) = get(ENV_LOG_FILTER) {
            self.filter = filter;
        }
        if let Some(path) = get(ENV_LOG_FILE) {
            self.file.enabled = true;
            self.file.path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console(mut self, enabled: bool, timestamps: bool) -> Self {
        self.console = ConsoleConfig {
            enabled,
            timestamps,
        };
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_debug_output(mut self, enabled: bool) -> Self {
        self.debug_output = enabled;
        self
    }

    /// Enable the file sink at `path`
    #[must_use = "builder methods return a new value"]
    pub fn with_file(mut self, path: impl Into<PathBuf>, timestamps: bool) -> Self {
        self.file = FileConfig {
            enabled: true,
            path: Some(path.into()),
            timestamps,
        };
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}
