//! # Ecto Logger
//!
//! A leveled, structured-logging facade. A [`Logger`] wraps one emit backend;
//! `with_field`, `with_fields`, `with_context` and `with_error` derive new
//! loggers that carry accumulated state, and the level methods build a
//! [`LogMessage`] and hand it to the backend.
//!
//! ## Features
//!
//! - **Five severities**: debug, info, warn, error, fatal, each with plain,
//!   formatted and per-call-context entry points
//! - **Copy-on-write chaining**: deriving never mutates the parent, so loggers
//!   are safe to share and derive from across threads
//! - **Pluggable backends**: anything implementing [`Emit`], including plain
//!   closures; a JSON console backend and a `log` crate adapter are included
//!
//! ```
//! use ecto_logger::{Context, Logger, LogMessage};
//!
//! let logger = Logger::new(|msg: LogMessage| println!("{} {}", msg.severity, msg.text));
//! let ctx = Context::background().with_value("request_id", "req-7");
//!
//! let request = logger.with_field("route", "/orders").with_context(ctx);
//! request.info("accepted");
//! request.warnf(format_args!("slow response: {}ms", 812));
//! ```

pub mod backends;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::backends::ConsoleBackend;
    #[cfg(feature = "log-backend")]
    pub use crate::backends::LogCrateBackend;
    pub use crate::core::{
        Context, Emit, FieldValue, Fields, LogMessage, Logger, LoggerError, OutputFormat, Result,
        Severity, SharedError, TimestampFormat,
    };
}

pub use backends::ConsoleBackend;
pub use core::{
    Context, Emit, FieldValue, Fields, LogMessage, Logger, LoggerError, OutputFormat, Result,
    Severity, SharedError, TimestampFormat,
};
