//! Backend adapter for the `log` crate
//!
//! Forwards facade messages to any `log::Log` implementation, with fields
//! carried as native `log::kv` key/value pairs.

use crate::core::{Emit, FieldValue, Fields, LogMessage, Logger};
use log::kv::{self, Key, Source, Value, VisitSource};

/// Transform applied to every message before it is translated
pub type BeforeHook = Box<dyn Fn(LogMessage) -> LogMessage + Send + Sync>;

/// Key under which an attached error is recorded
pub const ERROR_KEY: &str = "error";

const DEFAULT_TARGET: &str = "ecto_logger";

enum Target {
    Global,
    Owned(Box<dyn log::Log>),
}

/// Emit backend that writes to a `log::Log`.
///
/// # Example
///
/// ```
/// use ecto_logger::backends::LogCrateBackend;
///
/// // Uses whatever logger was installed with `log::set_logger`
/// let logger = LogCrateBackend::global()
///     .with_target("billing")
///     .into_logger();
///
/// logger.with_field("invoice", 1042).warn("retrying charge");
/// ```
pub struct LogCrateBackend {
    target: Target,
    target_name: String,
    before: Option<BeforeHook>,
}

impl LogCrateBackend {
    /// Forward to the process logger installed via `log::set_logger`.
    ///
    /// Records above `log::max_level()` are dropped before reaching it.
    pub fn global() -> Self {
        Self {
            target: Target::Global,
            target_name: DEFAULT_TARGET.to_string(),
            before: None,
        }
    }

    /// Forward to an owned logger
    pub fn new<L: log::Log + 'static>(logger: L) -> Self {
        Self {
            target: Target::Owned(Box::new(logger)),
            target_name: DEFAULT_TARGET.to_string(),
            before: None,
        }
    }

    /// Set the record target (defaults to `"ecto_logger"`)
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_name = target.into();
        self
    }

    /// Run `before` over every message ahead of translation. It may rewrite
    /// any part of the message, including adding fields.
    #[must_use]
    pub fn with_before<F>(mut self, before: F) -> Self
    where
        F: Fn(LogMessage) -> LogMessage + Send + Sync + 'static,
    {
        self.before = Some(Box::new(before));
        self
    }

    /// Wrap this backend in a root facade
    #[must_use]
    pub fn into_logger(self) -> Logger {
        Logger::new(self)
    }

    fn logger(&self) -> &dyn log::Log {
        match &self.target {
            Target::Global => log::logger(),
            Target::Owned(logger) => logger.as_ref(),
        }
    }
}

impl Emit for LogCrateBackend {
    fn emit(&self, message: LogMessage) {
        let message = match &self.before {
            Some(before) => before(message),
            None => message,
        };

        let level = translate_level(message.severity.as_str());
        // Same process-wide filter the `log` macros apply
        if matches!(self.target, Target::Global) && level > log::max_level() {
            return;
        }
        let logger = self.logger();
        let metadata = log::Metadata::builder()
            .level(level)
            .target(&self.target_name)
            .build();
        if !logger.enabled(&metadata) {
            return;
        }

        let error = message.error_string();
        let source = MessageSource {
            fields: &message.fields,
            error: error.as_deref(),
        };

        logger.log(
            &log::Record::builder()
                .metadata(metadata)
                .args(format_args!("{}", message.text))
                .key_values(&source)
                .build(),
        );
    }
}

/// Translate a severity name into a `log::Level`.
///
/// `fatal` (and zap-style `panic`/`dpanic`) map to `Error`, the highest level
/// `log` has. Anything unrecognized maps to `Info` instead of failing.
pub fn translate_level(severity: &str) -> log::Level {
    match severity.to_ascii_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "info" => log::Level::Info,
        "warn" | "warning" => log::Level::Warn,
        "error" | "fatal" | "panic" | "dpanic" => log::Level::Error,
        _ => log::Level::Info,
    }
}

struct MessageSource<'a> {
    fields: &'a Fields,
    error: Option<&'a str>,
}

impl Source for MessageSource<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for (key, value) in self.fields {
            visitor.visit_pair(Key::from_str(key), field_to_value(value))?;
        }
        if let Some(error) = self.error {
            visitor.visit_pair(Key::from_str(ERROR_KEY), Value::from(error))?;
        }
        Ok(())
    }
}

fn field_to_value(value: &FieldValue) -> Value<'_> {
    match value {
        FieldValue::String(s) => Value::from(s.as_str()),
        FieldValue::Int(i) => Value::from(*i),
        FieldValue::UInt(u) => Value::from(*u),
        FieldValue::Float(f) => Value::from(*f),
        FieldValue::Bool(b) => Value::from(*b),
        FieldValue::Null => Value::null(),
        FieldValue::Json(v) => Value::from_display(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Severity};
    use parking_lot::Mutex;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Captured {
        level: log::Level,
        target: String,
        text: String,
        kvs: BTreeMap<String, String>,
    }

    struct Collector(BTreeMap<String, String>);

    impl<'kvs> VisitSource<'kvs> for Collector {
        fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
            self.0.insert(key.as_str().to_string(), value.to_string());
            Ok(())
        }
    }

    #[derive(Clone)]
    struct CaptureLogger {
        max_level: log::Level,
        records: Arc<Mutex<Vec<Captured>>>,
    }

    impl CaptureLogger {
        fn new(max_level: log::Level) -> Self {
            Self {
                max_level,
                records: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= self.max_level
        }

        fn log(&self, record: &log::Record) {
            let mut collector = Collector(BTreeMap::new());
            record
                .key_values()
                .visit(&mut collector)
                .expect("collecting key/values");
            self.records.lock().push(Captured {
                level: record.level(),
                target: record.target().to_string(),
                text: record.args().to_string(),
                kvs: collector.0,
            });
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_translate_level() {
        assert_eq!(translate_level("debug"), log::Level::Debug);
        assert_eq!(translate_level("info"), log::Level::Info);
        assert_eq!(translate_level("WARN"), log::Level::Warn);
        assert_eq!(translate_level("error"), log::Level::Error);
        assert_eq!(translate_level("fatal"), log::Level::Error);
    }

    #[test]
    fn test_translate_unknown_defaults_to_info() {
        assert_eq!(translate_level("verbose"), log::Level::Info);
        assert_eq!(translate_level(""), log::Level::Info);
        assert_eq!(translate_level("критично"), log::Level::Info);
    }

    #[test]
    fn test_fields_and_error_become_key_values() {
        let capture = CaptureLogger::new(log::Level::Trace);
        let logger = LogCrateBackend::new(capture.clone()).into_logger();

        logger
            .with_field("user", "alice")
            .with_field("attempt", 2)
            .with_field("ratio", 0.5)
            .with_field("nested", serde_json::json!({"a": [1, 2]}))
            .with_error(std::io::Error::new(std::io::ErrorKind::Other, "timeout"))
            .error("request failed");

        let records = capture.records.lock();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.level, log::Level::Error);
        assert_eq!(record.target, "ecto_logger");
        assert_eq!(record.text, "request failed");
        assert_eq!(record.kvs["user"], "alice");
        assert_eq!(record.kvs["attempt"], "2");
        assert_eq!(record.kvs["ratio"], "0.5");
        assert_eq!(record.kvs["nested"], r#"{"a":[1,2]}"#);
        assert_eq!(record.kvs[ERROR_KEY], "timeout");
    }

    #[test]
    fn test_no_error_key_without_error() {
        let capture = CaptureLogger::new(log::Level::Trace);
        let logger = LogCrateBackend::new(capture.clone()).into_logger();
        logger.info("plain");

        assert!(capture.records.lock()[0].kvs.is_empty());
    }

    #[test]
    fn test_every_severity_is_forwarded() {
        let capture = CaptureLogger::new(log::Level::Trace);
        let logger = LogCrateBackend::new(capture.clone()).into_logger();
        for severity in Severity::ALL {
            logger.log(severity, severity.as_str());
        }

        let levels: Vec<_> = capture.records.lock().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                log::Level::Debug,
                log::Level::Info,
                log::Level::Warn,
                log::Level::Error,
                log::Level::Error,
            ]
        );
    }

    #[test]
    fn test_backend_filtering_is_respected() {
        let capture = CaptureLogger::new(log::Level::Warn);
        let logger = LogCrateBackend::new(capture.clone()).into_logger();
        logger.debug("dropped by backend");
        logger.info("dropped by backend");
        logger.warn("kept");

        let records = capture.records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "kept");
    }

    #[test]
    fn test_before_hook_rewrites_message() {
        let capture = CaptureLogger::new(log::Level::Trace);
        let logger = LogCrateBackend::new(capture.clone())
            .with_target("payments")
            .with_before(|mut msg: LogMessage| {
                if let Some(ctx) = &msg.context {
                    if let Some(id) = ctx.value("request_id") {
                        msg.fields.insert("request_id".into(), id.clone());
                    }
                }
                msg.text = format!("[svc] {}", msg.text);
                msg
            })
            .into_logger();

        let ctx = Context::background().with_value("request_id", "req-9");
        logger.info_context(&ctx, "charged");

        let records = capture.records.lock();
        assert_eq!(records[0].target, "payments");
        assert_eq!(records[0].text, "[svc] charged");
        assert_eq!(records[0].kvs["request_id"], "req-9");
    }
}
