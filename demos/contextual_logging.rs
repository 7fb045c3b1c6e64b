//! Contextual logging example
//!
//! Demonstrates child loggers that carry request-scoped fields.
//!
//! Run with: cargo run --example contextual_logging

use json_line_logger::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
struct Client<'a> {
    addr: &'a str,
    agent: &'a str,
}

fn handle(logger: &Logger, request_id: &str, path: &str) {
    let request = logger
        .string("request_id", request_id)
        .string("path", path)
        .logger();

    request.infof(format_args!("request started"));
    request
        .json("client", &Client { addr: "10.0.0.7", agent: "curl/8.4" })
        .debugf(format_args!("client details"));
    request.int("status", 200).infof(format_args!("request finished"));
}

fn main() -> Result<()> {
    println!("=== JSON Line Logger - Contextual Logging Example ===\n");

    let root = Logger::builder(LogLevel::Debug, StdoutSink)
        .message_key("msg")
        .level_key("level")
        .build();
    let service = root.string("service", "api").logger();

    handle(&service, "r-1001", "/users");
    handle(&service, "r-1002", "/orders");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
