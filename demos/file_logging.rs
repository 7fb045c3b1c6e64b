//! File logging example
//!
//! Demonstrates writing JSON lines to a file sink.
//!
//! Run with: cargo run --example file_logging

use json_line_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== JSON Line Logger - File Logging Example ===\n");

    let log_path = std::env::temp_dir().join("json_line_logger_demo.jsonl");
    let _ = fs::remove_file(&log_path);

    let logger = Logger::builder(LogLevel::Info, FileSink::new(&log_path)?)
        .timestamp_format(TimestampFormat::Rfc3339)
        .build();

    for i in 0..5 {
        logger.int("batch", i).infof(format_args!("processed batch {}", i));
    }
    logger.warnf(format_args!("disk usage above 80%"));

    println!("Wrote records to {}:\n", log_path.display());
    print!("{}", fs::read_to_string(&log_path)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
