//! Timestamp utilities
//!
//! Records carry two clocks: the elapsed time since the process time origin
//! (the default prefix of the text sinks) and the wall-clock time, which the
//! chrono-based formats render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Instant;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Pin the process time origin. Called by [`crate::init`]; later calls are
/// no-ops.
pub fn pin_process_start() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

/// Seconds elapsed since the process time origin.
///
/// # Examples
///
/// ```
/// use rust_channel_logger::current_message_time;
///
/// let a = current_message_time();
/// let b = current_message_time();
/// assert!(b >= a);
/// ```
pub fn current_message_time() -> f32 {
    pin_process_start().elapsed().as_secs_f32()
}

/// Timestamp prefix format for the text sinks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Seconds since process start, right-aligned: `    12.3456`
    #[default]
    Elapsed,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Custom strftime format
    ///
    /// ```
    /// use rust_channel_logger::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Render a timestamp from the two clocks of a record
    #[must_use]
    pub fn format(&self, elapsed: f32, wall_clock: impl FnOnce() -> DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Elapsed => format!("{:10.4}", elapsed),
            TimestampFormat::Iso8601 => wall_clock().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => wall_clock().to_rfc3339(),
            TimestampFormat::Custom(format_str) => wall_clock().format(format_str).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_elapsed_format_skips_wall_clock() {
        let result = TimestampFormat::Elapsed.format(1.5, || -> DateTime<Utc> {
            unreachable!("elapsed timestamps never read the system clock")
        });
        assert_eq!(result, "    1.5000");
    }

    #[test]
    fn test_elapsed_format() {
        let result = TimestampFormat::Elapsed.format(12.345_67, fixed_datetime);
        assert_eq!(result, "   12.3457");
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(0.0, fixed_datetime);
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(0.0, fixed_datetime);
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(0.0, fixed_datetime), "2025/01/08 10:30");
    }

    #[test]
    fn test_process_time_is_monotonic() {
        let origin = pin_process_start();
        assert_eq!(origin, pin_process_start());

        let first = current_message_time();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(current_message_time() > first);
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str("\"Elapsed\"").expect("deserialize Elapsed");
        assert_eq!(format, TimestampFormat::Elapsed);

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
