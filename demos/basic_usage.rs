//! Basic logger usage example
//!
//! Demonstrates the global logger with the console sink, per-module channels
//! and the severity threshold.
//!
//! Run with: cargo run --example basic_usage

use rust_channel_logger::prelude::*;

log_channel!(Demo);

mod cdrom {
    use rust_channel_logger::{info_log, log_channel, verbose_log, warning_log};

    log_channel!(Cdrom);

    pub fn read_sector(lba: u32) {
        verbose_log!("seeking to LBA {}", lba);
        if lba > 300_000 {
            warning_log!("LBA {} is past the end of the disc", lba);
            return;
        }
        info_log!("read sector {}", lba);
    }
}

fn main() -> Result<()> {
    println!("=== Rust Channel Logger - Basic Usage Example ===\n");

    // Console output with timestamps, plus LOG_LEVEL/LOG_FILTER/LOG_FILE
    rust_channel_logger::init()?;

    println!("1. Logging at different levels:");
    rust_channel_logger::set_level(LogLevel::Trace);
    error_log!("This is an error message");
    warning_log!("This is a warning message");
    info_log!("This is an info message");
    verbose_log!("This is a verbose message");
    dev_log!("This is a dev message");
    debug_log!("This is a debug message");
    trace_log!("This is a trace message");

    println!("\n2. Raising the threshold to Warning:");
    rust_channel_logger::set_level(LogLevel::Warning);
    info_log!("Info message (hidden)");
    warning_log!("Warning message (visible)");

    println!("\n3. Messages from another module's channel:");
    rust_channel_logger::set_level(LogLevel::Verbose);
    cdrom::read_sector(16);
    cdrom::read_sector(400_000);

    println!("\n4. Console without timestamps:");
    rust_channel_logger::set_console_output(true, false);
    info_log!("No timestamp on this line");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
