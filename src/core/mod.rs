//! Core facade types and traits

pub mod context;
pub mod emit;
pub mod error;
pub mod fields;
pub mod logger;
pub mod message;
pub mod output_format;
pub mod severity;
pub mod timestamp;

pub use context::Context;
pub use emit::Emit;
pub use error::{LoggerError, Result, SharedError};
pub use fields::{FieldValue, Fields};
pub use logger::Logger;
pub use message::LogMessage;
pub use output_format::OutputFormat;
pub use severity::Severity;
pub use timestamp::TimestampFormat;
