//! Basic logger usage example
//!
//! Demonstrates building a logger, typed fields and level filtering.
//!
//! Run with: cargo run --example basic_usage

use json_line_logger::prelude::*;
use json_line_logger::{infof, warnf};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== JSON Line Logger - Basic Usage Example ===\n");

    let logger = Logger::builder(LogLevel::Debug, StdoutSink)
        .timestamp_zone(TimestampZone::Utc)
        .build();

    println!("1. Logging at different levels:");
    logger.debugf(format_args!("This is a debug message"));
    logger.infof(format_args!("This is an info message"));
    logger.warnf(format_args!("This is a warning message"));
    logger.errorf(format_args!("This is an error message"));

    println!("\n2. Typed fields:");
    logger
        .string("user", "alice")
        .uint("items", 3)
        .float64("total", 42.5)
        .duration("elapsed", Duration::from_millis(230))
        .bool("express", true)
        .infof(format_args!("order placed"));

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    logger.err(&err).logf(LogLevel::Error, format_args!("payment failed"))?;

    println!("\n3. Raising the level to WARNING hides debug and info:");
    let quiet = logger.with_level(LogLevel::Warn);
    infof!(quiet, "Info message (hidden)");
    warnf!(quiet, "Warning message (visible), retry {} of {}", 1, 3);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
