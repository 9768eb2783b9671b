//! Log message envelope handed to emit callbacks

use super::context::Context;
use super::error::SharedError;
use super::fields::Fields;
use super::severity::Severity;
use chrono::{DateTime, Utc};

/// One emitted log event.
///
/// Built fresh by the facade for every entry-point call and handed to the
/// backend by value; the facade keeps no reference to it afterwards.
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub severity: Severity,
    pub text: String,
    pub fields: Fields,
    pub context: Option<Context>,
    pub error: Option<SharedError>,
    /// When the facade built the message
    pub timestamp: DateTime<Utc>,
}

impl LogMessage {
    /// A message with no fields, context or error, stamped now
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            fields: Fields::new(),
            context: None,
            error: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: SharedError) -> Self {
        self.error = Some(error);
        self
    }

    /// The attached error rendered with `Display`, if any
    pub fn error_string(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}
