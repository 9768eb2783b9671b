//! Chainable logging facade

use super::{
    context::Context,
    emit::Emit,
    error::SharedError,
    fields::{overlay_merge, FieldValue, Fields},
    message::LogMessage,
    severity::Severity,
};
use chrono::Utc;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Generates the four entry points of one severity.
macro_rules! severity_methods {
    ($severity:expr, $name:literal, $plain:ident, $formatted:ident, $ctx:ident, $ctx_formatted:ident) => {
        #[doc = concat!("Log `text` verbatim at ", $name, ".")]
        #[inline]
        pub fn $plain(&self, text: impl Into<String>) {
            self.log($severity, text);
        }

        #[doc = concat!("Log pre-captured format arguments at ", $name, ".")]
        #[doc = ""]
        #[doc = "Build `args` with `format_args!`; it is rendered before the backend runs."]
        #[inline]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.logf($severity, args);
        }

        #[doc = concat!("Log `text` at ", $name, " with `ctx` as this message's context.")]
        #[inline]
        pub fn $ctx(&self, ctx: &Context, text: impl Into<String>) {
            self.log_context($severity, ctx, text);
        }

        #[doc = concat!("Log format arguments at ", $name, " with `ctx` as this message's context.")]
        #[inline]
        pub fn $ctx_formatted(&self, ctx: &Context, args: fmt::Arguments<'_>) {
            self.log_contextf($severity, ctx, args);
        }
    };
}

/// Logging handle.
///
/// A root logger wraps one emit backend and carries no fields, context or
/// error. Every `with_*` call returns a new derived logger; the receiver is
/// never modified, so a logger can be shared freely across call sites and
/// threads and derived from concurrently.
///
/// Every entry point builds a [`LogMessage`] and hands it to the backend
/// synchronously, exactly once. The facade does no level filtering and never
/// terminates the process, not even for `fatal`.
///
/// # Example
///
/// ```
/// use ecto_logger::{Logger, LogMessage};
///
/// let logger = Logger::new(|msg: LogMessage| {
///     assert_eq!(msg.fields.len(), 2);
/// });
///
/// let request_logger = logger
///     .with_field("request_id", "req-1")
///     .with_field("attempt", 3);
/// request_logger.info("handled");
/// ```
#[derive(Clone)]
pub struct Logger {
    emit: Arc<dyn Emit>,
    fields: Arc<Fields>,
    context: Option<Context>,
    error: Option<SharedError>,
}

impl Logger {
    /// Create a root logger around an emit backend
    #[must_use]
    pub fn new<E: Emit + 'static>(backend: E) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Create a root logger around an already shared backend
    #[must_use]
    pub fn from_shared(backend: Arc<dyn Emit>) -> Self {
        Self {
            emit: backend,
            fields: Arc::new(Fields::new()),
            context: None,
            error: None,
        }
    }

    /// Create a root logger writing JSON lines to the process-wide sink
    #[must_use]
    pub fn console() -> Self {
        Self::new(crate::backends::ConsoleBackend::new())
    }

    /// Overlay `fields` onto the accumulated fields; new keys win.
    #[must_use]
    pub fn with_fields<I, K, V>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut next = self.clone();
        overlay_merge(Arc::make_mut(&mut next.fields), fields);
        next
    }

    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.with_fields([(key.into(), value.into())])
    }

    /// Replace the stored context
    #[must_use]
    pub fn with_context(&self, ctx: Context) -> Self {
        Self {
            context: Some(ctx),
            ..self.clone()
        }
    }

    /// Replace the stored error
    #[must_use]
    pub fn with_error<E>(&self, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_error(Arc::new(err))
    }

    /// Replace the stored error with one that is already shared
    #[must_use]
    pub fn with_shared_error(&self, err: SharedError) -> Self {
        Self {
            error: Some(err),
            ..self.clone()
        }
    }

    /// Fields accumulated along the derivation chain
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Stored context, if any
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Stored error, if any. Not named `error` because that is the
    /// Error-severity entry point.
    pub fn attached_error(&self) -> Option<&SharedError> {
        self.error.as_ref()
    }

    /// Log `text` verbatim at a severity chosen at runtime
    pub fn log(&self, severity: Severity, text: impl Into<String>) {
        self.dispatch(severity, text.into(), None);
    }

    /// Log format arguments at a severity chosen at runtime
    pub fn logf(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.dispatch(severity, args.to_string(), None);
    }

    /// Log with a per-call context that overrides the stored one for this
    /// message only
    pub fn log_context(&self, severity: Severity, ctx: &Context, text: impl Into<String>) {
        self.dispatch(severity, text.into(), Some(ctx));
    }

    /// Formatted variant of [`Logger::log_context`]
    pub fn log_contextf(&self, severity: Severity, ctx: &Context, args: fmt::Arguments<'_>) {
        self.dispatch(severity, args.to_string(), Some(ctx));
    }

    fn dispatch(&self, severity: Severity, text: String, call_context: Option<&Context>) {
        let context = call_context.or(self.context.as_ref()).cloned();

        let message = LogMessage {
            severity,
            text,
            fields: Fields::clone(&self.fields),
            context,
            error: self.error.clone(),
            timestamp: Utc::now(),
        };
        self.emit.emit(message);
    }

    severity_methods!(Severity::Debug, "debug", debug, debugf, debug_context, debug_contextf);
    severity_methods!(Severity::Info, "info", info, infof, info_context, info_contextf);
    severity_methods!(Severity::Warn, "warn", warn, warnf, warn_context, warn_contextf);
    severity_methods!(Severity::Error, "error", error, errorf, error_context, error_contextf);
    severity_methods!(Severity::Fatal, "fatal", fatal, fatalf, fatal_context, fatal_contextf);
}

impl Default for Logger {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("fields", &self.fields)
            .field("context", &self.context)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .finish_non_exhaustive()
    }
}
