//! Basic facade usage
//!
//! Demonstrates the default console backend, field chaining, error and
//! context attachment, and the text output format.
//!
//! Run with: cargo run --example basic_usage

use ecto_logger::prelude::*;
use ecto_logger::{info, warn};

#[derive(Debug)]
struct UpstreamTimeout;

impl std::fmt::Display for UpstreamTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upstream did not answer within 2s")
    }
}

impl std::error::Error for UpstreamTimeout {}

fn main() {
    println!("=== Ecto Logger - Basic Usage Example ===\n");

    // Root logger on the process-wide stdout sink, one JSON object per line
    let logger = Logger::console();

    println!("1. Logging at every severity:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message (the process keeps running)");

    println!("\n2. Chaining fields, errors and context:");
    let service = logger.with_fields([("service", "checkout"), ("region", "eu-west-1")]);
    let ctx = Context::background().with_value("request_id", "req-1029");

    let request = service.with_field("route", "/orders").with_context(ctx.clone());
    request.infof(format_args!("accepted order {}", 77));
    request
        .with_error(UpstreamTimeout)
        .error_context(&ctx, "payment call failed");
    info!(service, "service logger is unchanged: {} fields", service.fields().len());

    println!("\n3. Human-readable text output:");
    let text_logger = Logger::new(
        ConsoleBackend::new()
            .with_output_format(OutputFormat::Text)
            .with_timestamp_format(TimestampFormat::Rfc3339Millis),
    );
    warn!(text_logger.with_field("disk", "/var"), "usage at {}%", 93);

    println!("\n=== Example completed successfully! ===");
}
