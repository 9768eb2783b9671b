//! Logging macros for ergonomic message formatting.
//!
//! Each macro captures its format arguments with `format_args!` and routes to
//! the matching formatted entry point, so interpolation happens on the calling
//! thread before the backend runs. Prefix the format string with
//! `context: ctx,` to use the per-call context variants.
//!
//! # Examples
//!
//! ```
//! use ecto_logger::prelude::*;
//! use ecto_logger::info;
//!
//! let logger = Logger::new(|_msg: LogMessage| {});
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With a per-call context
//! let ctx = Context::background().with_value("request_id", "abc");
//! info!(logger, context: ctx, "Handled request in {}ms", 12);
//! ```

/// Log a message at a severity chosen at runtime.
///
/// # Examples
///
/// ```
/// # use ecto_logger::prelude::*;
/// # let logger = Logger::new(|_msg: LogMessage| {});
/// use ecto_logger::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, context: $ctx:expr, $($arg:tt)+) => {
        $logger.log_contextf($severity, &$ctx, format_args!($($arg)+))
    };
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.logf($severity, format_args!($($arg)+))
    };
}

/// Log a debug message.
///
/// ```
/// # use ecto_logger::prelude::*;
/// # let logger = Logger::new(|_msg: LogMessage| {});
/// use ecto_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, context: $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, context: $ctx, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info message.
///
/// ```
/// # use ecto_logger::prelude::*;
/// # let logger = Logger::new(|_msg: LogMessage| {});
/// use ecto_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, context: $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, context: $ctx, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning.
///
/// ```
/// # use ecto_logger::prelude::*;
/// # let logger = Logger::new(|_msg: LogMessage| {});
/// use ecto_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, context: $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, context: $ctx, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error.
///
/// ```
/// # use ecto_logger::prelude::*;
/// # let logger = Logger::new(|_msg: LogMessage| {});
/// use ecto_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, context: $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, context: $ctx, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal message. This does not terminate the process.
///
/// ```
/// # use ecto_logger::prelude::*;
/// # let logger = Logger::new(|_msg: LogMessage| {});
/// use ecto_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, context: $ctx:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, context: $ctx, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Context, LogMessage, Logger, Severity};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capture() -> (Logger, Arc<Mutex<Vec<LogMessage>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (Logger::new(move |msg: LogMessage| sink.lock().push(msg)), seen)
    }

    #[test]
    fn test_log_macro() {
        let (logger, seen) = capture();
        log!(logger, Severity::Info, "Test message");
        log!(logger, Severity::Warn, "Formatted: {}", 42);

        let seen = seen.lock();
        assert_eq!(seen[0].text, "Test message");
        assert_eq!(seen[1].severity, Severity::Warn);
        assert_eq!(seen[1].text, "Formatted: 42");
    }

    #[test]
    fn test_level_macros() {
        let (logger, seen) = capture();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");

        let summary: Vec<_> = seen
            .lock()
            .iter()
            .map(|m| (m.severity, m.text.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Severity::Debug, "Count: 5".to_string()),
                (Severity::Info, "Items: 100".to_string()),
                (Severity::Warn, "Retry 1 of 3".to_string()),
                (Severity::Error, "Code: 500".to_string()),
                (Severity::Fatal, "Critical failure: system".to_string()),
            ]
        );
    }

    #[test]
    fn test_context_macros() {
        let (logger, seen) = capture();
        let stored = Context::background().with_value("id", "stored");
        let per_call = Context::background().with_value("id", "call");
        let derived = logger.with_context(stored.clone());

        info!(derived, context: per_call, "with {}", "override");
        error!(derived, context: &per_call, "by reference");
        warn!(derived, "no override");

        let seen = seen.lock();
        assert!(seen[0].context.as_ref().unwrap().same_as(&per_call));
        assert_eq!(seen[0].text, "with override");
        assert!(seen[1].context.as_ref().unwrap().same_as(&per_call));
        assert!(seen[2].context.as_ref().unwrap().same_as(&stored));
    }

    #[test]
    fn test_arguments_render_before_dispatch() {
        let (logger, seen) = capture();
        let mut value = String::from("before");
        info!(logger, "value={}", value);
        value.push_str("-after");

        assert_eq!(seen.lock()[0].text, "value=before");
        assert_eq!(value, "before-after");
    }
}
