//! Forwarding facade messages to the `log` crate
//!
//! Installs a minimal `log::Log` implementation that prints records with
//! their structured key/values, then logs through the adapter.
//!
//! Run with: cargo run --example log_crate_backend

use ecto_logger::backends::LogCrateBackend;
use ecto_logger::prelude::*;
use log::kv::{Error as KvError, Key, Value, VisitSource};

struct PrintPairs(String);

impl<'kvs> VisitSource<'kvs> for PrintPairs {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> std::result::Result<(), KvError> {
        self.0.push_str(&format!(" {}={}", key, value));
        Ok(())
    }
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        let mut pairs = PrintPairs(String::new());
        if record.key_values().visit(&mut pairs).is_err() {
            pairs.0.push_str(" <unreadable key/values>");
        }
        eprintln!("{:<5} {} {}{}", record.level(), record.target(), record.args(), pairs.0);
    }

    fn flush(&self) {}
}

static STDERR_LOGGER: StderrLogger = StderrLogger;

fn main() {
    if let Err(e) = log::set_logger(&STDERR_LOGGER) {
        eprintln!("logger already installed: {}", e);
        return;
    }
    log::set_max_level(log::LevelFilter::Info);

    let logger = LogCrateBackend::global()
        .with_target("orders")
        .with_before(|mut msg: LogMessage| {
            msg.fields.insert("host".into(), FieldValue::from("web-3"));
            msg
        })
        .into_logger();

    logger.debug("filtered out by the log backend");
    logger.with_field("order_id", 7781).info("order placed");
    logger
        .with_error(std::io::Error::new(std::io::ErrorKind::TimedOut, "inventory timeout"))
        .fatal("could not reserve stock");
}
