//! Integration tests for the process-wide logger
//!
//! These tests verify:
//! - Severity threshold and channel filter scenarios
//! - Callback registration, delivery and idempotent removal
//! - Delivery order across sinks
//! - File sink output and non-fatal open failures
//! - Lazy argument evaluation in the call-site macros
//! - Re-entrant logging from inside a sink

mod common;

use common::{capture, exclusive_logger, register, Captured, SharedBuffer};
use parking_lot::Mutex;
use rust_channel_logger::{
    error_log, info_log, log_channel, verbose_log, warning_log, ConsoleAppender, LogConfig,
    LogLevel, Logger, UserParam,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

log_channel!(Net);

/// Callback target; handed to the logger through a [`UserParam`]
#[derive(Default)]
struct CallbackLog {
    calls: Mutex<Vec<Captured>>,
}

fn record_callback(user: UserParam, channel: &str, function: &str, level: LogLevel, message: &str) {
    // SAFETY: registrations are dropped before their CallbackLog
    if let Some(log) = unsafe { user.as_ref::<CallbackLog>() } {
        log.calls.lock().push(Captured {
            channel: channel.to_string(),
            function: (!function.is_empty()).then(|| function.to_string()),
            level,
            message: message.to_string(),
        });
    }
}

#[test]
fn test_threshold_scenario() {
    let _guard = exclusive_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("threshold.log");

    rust_channel_logger::set_level(LogLevel::Warning);
    rust_channel_logger::set_filter("").unwrap();
    rust_channel_logger::set_console_output(true, true);
    rust_channel_logger::set_file_output(true, &log_file, false).unwrap();

    rust_channel_logger::write("Net", LogLevel::Info, "link up");
    rust_channel_logger::write("Net", LogLevel::Error, "connect failed");
    rust_channel_logger::flush().unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["E(Net): connect failed"]);
}

#[test]
fn test_channel_filter_scenario() {
    let _guard = exclusive_logger();
    let records = capture();

    rust_channel_logger::set_filter("Net").unwrap();
    rust_channel_logger::set_level(LogLevel::Info);

    rust_channel_logger::write("Disk", LogLevel::Info, "spinning up");
    rust_channel_logger::write("Net", LogLevel::Info, "spinning up");

    let records = records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].channel, "Net");
    assert!(!rust_channel_logger::is_visible(LogLevel::Info, "Disk"));
    assert!(rust_channel_logger::is_visible(LogLevel::Info, "Net"));
}

#[test]
fn test_callback_scenario() {
    let _guard = exclusive_logger();
    let log = CallbackLog::default();
    let user = UserParam::new(&log);

    let registration = register(record_callback, user);
    rust_channel_logger::write_with_function("Net", "connect", LogLevel::Error, "connect failed");

    {
        let calls = log.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            Captured {
                channel: "Net".to_string(),
                function: Some("connect".to_string()),
                level: LogLevel::Error,
                message: "connect failed".to_string(),
            }
        );
    }

    drop(registration);
    rust_channel_logger::write("Net", LogLevel::Error, "second failure");
    assert_eq!(log.calls.lock().len(), 1);
}

#[test]
fn test_unregister_is_idempotent() {
    let _guard = exclusive_logger();
    let log = CallbackLog::default();
    let never_registered = CallbackLog::default();
    let user = UserParam::new(&log);

    let _registration = register(record_callback, user);
    // Duplicate registration does not duplicate delivery
    rust_channel_logger::register_callback(record_callback, user);
    rust_channel_logger::unregister_callback(record_callback, UserParam::new(&never_registered));

    rust_channel_logger::write("Net", LogLevel::Info, "once");
    assert_eq!(log.calls.lock().len(), 1);

    rust_channel_logger::unregister_callback(record_callback, user);
    rust_channel_logger::unregister_callback(record_callback, user);
    rust_channel_logger::write("Net", LogLevel::Info, "never seen");
    assert_eq!(log.calls.lock().len(), 1);
    assert!(never_registered.calls.lock().is_empty());
}

#[test]
fn test_none_threshold_suppresses_everything() {
    let _guard = exclusive_logger();
    let records = capture();

    rust_channel_logger::set_level(LogLevel::None);
    for level in LogLevel::ALL {
        rust_channel_logger::write("Net", level, "suppressed");
    }
    error_log!("suppressed {}", 1);
    assert!(records.lock().is_empty());

    rust_channel_logger::set_level(LogLevel::Error);
    rust_channel_logger::write("Net", LogLevel::Error, "back");
    assert_eq!(records.lock().len(), 1);
}

#[test]
fn test_delivery_order_follows_registration() {
    let _guard = exclusive_logger();
    let order = Mutex::new(Vec::<&'static str>::new());

    fn first(user: UserParam, _: &str, _: &str, _: LogLevel, _: &str) {
        // SAFETY: `order` outlives both registrations
        if let Some(order) = unsafe { user.as_ref::<Mutex<Vec<&'static str>>>() } {
            order.lock().push("first");
        }
    }

    fn second(user: UserParam, _: &str, _: &str, _: LogLevel, _: &str) {
        // SAFETY: `order` outlives both registrations
        if let Some(order) = unsafe { user.as_ref::<Mutex<Vec<&'static str>>>() } {
            order.lock().push("second");
        }
    }

    let user = UserParam::new(&order);
    let second_registration = register(second, user);
    let first_registration = register(first, user);

    rust_channel_logger::write("Net", LogLevel::Info, "a");
    rust_channel_logger::write("Net", LogLevel::Info, "b");

    drop(second_registration);
    drop(first_registration);

    assert_eq!(*order.lock(), vec!["second", "first", "second", "first"]);
}

#[test]
fn test_disabled_sinks_receive_nothing() {
    let _guard = exclusive_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("toggle.log");

    rust_channel_logger::set_file_output(true, &log_file, false).unwrap();
    rust_channel_logger::write("Disk", LogLevel::Info, "while enabled");
    rust_channel_logger::set_file_output(false, "", false).unwrap();
    assert!(!rust_channel_logger::is_file_output_enabled());
    rust_channel_logger::write("Disk", LogLevel::Info, "while disabled");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "I(Disk): while enabled\n");
}

#[test]
fn test_file_open_failure_is_not_fatal() {
    let _guard = exclusive_logger();
    let records = capture();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bad_path = temp_dir.path().join("no").join("such").join("dir.log");

    let result = rust_channel_logger::set_file_output(true, &bad_path, true);
    assert!(result.is_err());
    assert!(!rust_channel_logger::is_file_output_enabled());

    rust_channel_logger::write("Net", LogLevel::Info, "logging continues");

    let records = records.lock();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].channel, rust_channel_logger::LOG_SELF_CHANNEL);
    assert_eq!(records[0].level, LogLevel::Error);
    assert_eq!(records[1].message, "logging continues");
}

#[test]
fn test_file_timestamps() {
    let _guard = exclusive_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stamped.log");

    rust_channel_logger::set_file_output(true, &log_file, true).unwrap();
    rust_channel_logger::write("Net", LogLevel::Warning, "slow");
    rust_channel_logger::flush().unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let line = content.lines().next().expect("one line");
    assert!(line.starts_with('['), "missing timestamp prefix: {}", line);
    assert!(line.ends_with("] W(Net): slow"), "unexpected line: {}", line);
}

#[test]
fn test_rejected_arguments_are_not_evaluated() {
    let _guard = exclusive_logger();
    let records = capture();
    let evaluated = AtomicUsize::new(0);
    let expensive = || {
        evaluated.fetch_add(1, Ordering::SeqCst);
        "payload"
    };

    rust_channel_logger::set_level(LogLevel::Info);
    verbose_log!("{}", expensive());
    assert_eq!(evaluated.load(Ordering::SeqCst), 0);

    info_log!("{}", expensive());
    assert_eq!(evaluated.load(Ordering::SeqCst), 1);
    assert_eq!(records.lock()[0].message, "payload");
}

#[test]
fn test_macros_tag_channel_and_function() {
    let _guard = exclusive_logger();
    let records = capture();

    fn open_socket() {
        warning_log!("retrying in {} ms", 250);
    }

    open_socket();
    info_log!(channel: "Disk"; "mounted");

    let records = records.lock();
    assert_eq!(records[0].channel, "Net");
    assert_eq!(records[0].function.as_deref(), Some("open_socket"));
    assert_eq!(records[0].level, LogLevel::Warning);
    assert_eq!(records[0].message, "retrying in 250 ms");
    assert_eq!(records[1].channel, "Disk");
    assert_eq!(records[1].function, None);
}

#[test]
fn test_reentrant_logging_from_callback_is_dropped() {
    let _guard = exclusive_logger();
    let records = capture();

    fn chatty(_: UserParam, _: &str, _: &str, _: LogLevel, _: &str) {
        rust_channel_logger::write("Nested", LogLevel::Error, "from inside a sink");
        rust_channel_logger::set_debug_output(true);
    }

    let registration = register(chatty, UserParam::null());
    let before = rust_channel_logger::metrics().reentrant_dropped();
    rust_channel_logger::write("Net", LogLevel::Info, "outer");
    drop(registration);

    let records = records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "outer");
    assert!(rust_channel_logger::metrics().reentrant_dropped() > before);
    // Sink configuration changes from inside a sink are ignored
    assert!(!rust_channel_logger::is_debug_output_enabled());
}

#[test]
fn test_init_with_json_config() {
    let _guard = exclusive_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");

    let json = format!(
        r#"{{
            "level": "Verbose",
            "filter": "Net* -NetNoise",
            "file": {{ "enabled": true, "path": {:?}, "timestamps": false }}
        }}"#,
        log_file.to_str().expect("utf-8 temp path")
    );
    let config = LogConfig::from_json(&json).unwrap();
    rust_channel_logger::init_with(&config).unwrap();

    assert_eq!(rust_channel_logger::level(), LogLevel::Verbose);
    assert_eq!(rust_channel_logger::filter(), "Net* -NetNoise");

    rust_channel_logger::write("NetSocket", LogLevel::Verbose, "kept");
    rust_channel_logger::write("NetNoise", LogLevel::Error, "excluded");
    rust_channel_logger::write("Disk", LogLevel::Error, "filtered");
    rust_channel_logger::flush().unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "V(NetSocket): kept\n");
}

#[test]
fn test_malformed_filter_falls_back_to_no_filtering() {
    let _guard = exclusive_logger();
    let records = capture();

    rust_channel_logger::set_filter("Net").unwrap();
    assert!(rust_channel_logger::set_filter("N*et").is_err());
    assert_eq!(rust_channel_logger::filter(), "");

    rust_channel_logger::write("Disk", LogLevel::Info, "visible");
    let records = records.lock();
    assert_eq!(records.last().map(|r| r.message.as_str()), Some("visible"));
}

#[test]
fn test_console_threshold_scenario() {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let logger = Logger::new();
    logger.set_level(LogLevel::Warning);
    logger.add_appender(Box::new(ConsoleAppender::with_writers(
        out.clone(),
        err.clone(),
        true,
    )));

    logger.write("Net", LogLevel::Info, "link up");
    logger.write("Net", LogLevel::Error, "connect failed");
    logger.flush().unwrap();

    assert!(out.lines().is_empty());
    let lines = err.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("E(Net): connect failed"), "unexpected line: {}", lines[0]);
    assert!(lines[0].starts_with('['), "missing timestamp prefix: {}", lines[0]);
}

#[test]
fn test_registration_is_undone_when_a_test_unwinds() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn count(_: UserParam, _: &str, _: &str, _: LogLevel, _: &str) {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    let _guard = exclusive_logger();
    let unwound = std::panic::catch_unwind(|| {
        let _registration = register(count, UserParam::null());
        rust_channel_logger::write("Net", LogLevel::Info, "while registered");
        panic!("assertion failed mid-test");
    });
    assert!(unwound.is_err());
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);

    rust_channel_logger::write("Net", LogLevel::Info, "after unwinding");
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}
