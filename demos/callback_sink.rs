//! Callback sink example
//!
//! Demonstrates forwarding records to a callback with a user parameter, and
//! a custom appender registered next to it.
//!
//! Run with: cargo run --example callback_sink

use rust_channel_logger::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

log_channel!(Gpu);

#[derive(Default)]
struct ErrorCounter {
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

fn count_diagnostics(user: UserParam, channel: &str, function: &str, level: LogLevel, message: &str) {
    // SAFETY: main() unregisters before the counter is dropped
    let Some(counter) = (unsafe { user.as_ref::<ErrorCounter>() }) else {
        return;
    };
    match level {
        LogLevel::Error => counter.errors.fetch_add(1, Ordering::Relaxed),
        LogLevel::Warning => counter.warnings.fetch_add(1, Ordering::Relaxed),
        _ => return,
    };
    println!("   [callback] {} {}::{} -> {}", level, channel, function, message);
}

/// Custom appender that prints records as JSON objects
struct JsonLinesAppender;

impl Appender for JsonLinesAppender {
    fn append(&mut self, entry: &LogEntry<'_>) -> Result<()> {
        let value = serde_json::json!({
            "time": entry.time,
            "level": entry.level,
            "channel": entry.channel,
            "function": entry.function,
            "message": entry.message,
        });
        println!("   [json] {}", value);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "json-lines"
    }
}

fn compile_shader(name: &str) {
    if name.ends_with(".bad") {
        error_log!("shader '{}' failed to compile", name);
    } else {
        info_log!("compiled '{}'", name);
    }
}

fn main() -> Result<()> {
    println!("=== Rust Channel Logger - Callback Sink Example ===\n");

    let counter = ErrorCounter::default();
    let user = UserParam::new(&counter);

    rust_channel_logger::register_callback(count_diagnostics, user);
    rust_channel_logger::add_appender(Box::new(JsonLinesAppender));

    println!("1. Delivering to the callback and the custom appender:");
    compile_shader("blit.vert");
    compile_shader("upscale.bad");
    warning_log!("falling back to software renderer");

    println!("\n2. After unregistering the callback:");
    rust_channel_logger::unregister_callback(count_diagnostics, user);
    // Unregistering twice is harmless
    rust_channel_logger::unregister_callback(count_diagnostics, user);
    compile_shader("late.bad");
    rust_channel_logger::remove_appender("json-lines");

    println!("\n=== Example completed successfully! ===");
    println!(
        "Callback saw {} errors and {} warnings",
        counter.errors.load(Ordering::Relaxed),
        counter.warnings.load(Ordering::Relaxed)
    );

    Ok(())
}
