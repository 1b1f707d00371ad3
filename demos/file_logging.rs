//! File logging example
//!
//! Demonstrates the file sink alongside the console, channel filtering and
//! configuration loaded from JSON.
//!
//! Run with: cargo run --example file_logging

use rust_channel_logger::prelude::*;

log_channel!(App);

fn main() -> Result<()> {
    println!("=== Rust Channel Logger - File Logging Example ===\n");

    let config = LogConfig::from_json(
        r#"{
            "level": "Dev",
            "console": { "enabled": true, "timestamps": false },
            "file": { "enabled": true, "path": "application.log", "timestamps": true }
        }"#,
    )?;
    rust_channel_logger::init_with(&config)?;

    println!("1. Logging to both console and file:");
    info_log!("Application started");
    dev_log!("Loading configuration...");
    warning_log!("Using default settings for some options");
    info_log!(channel: "Database"; "Connecting to database...");
    info_log!(channel: "Database"; "Database connection established");
    error_log!(channel: "Plugin"; "Failed to load optional plugin");

    println!("\n2. Restricting output to the App channel:");
    rust_channel_logger::set_filter("App")?;
    for i in 1..=5 {
        info_log!("Processing item {}/5", i);
        info_log!(channel: "Database"; "query {} (filtered)", i);
    }

    println!("\n3. A malformed filter disables filtering:");
    if let Err(e) = rust_channel_logger::set_filter("Data*base") {
        println!("   rejected: {}", e);
    }
    info_log!(channel: "Database"; "Visible again");

    rust_channel_logger::flush()?;

    let metrics = rust_channel_logger::metrics();
    println!("\n=== Example completed successfully! ===");
    println!(
        "Delivered {} records, filtered {}",
        metrics.total_logged(),
        metrics.filtered_count()
    );
    println!("Check 'application.log' for the full log output");

    Ok(())
}
