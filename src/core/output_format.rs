//! Output format configuration for rendered log lines
//!
//! - Json: one JSON object per line (default)
//! - Text: human-readable line for terminals

use super::error::Result;
use super::fields::format_fields;
use super::message::LogMessage;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// JSON object seeded with `level`, `message`, `err` and `time`, overlaid
    /// with the message fields
    ///
    /// Example: `{"level":"info","message":"Request processed","err":null,"time":"2025-01-08T10:30:45Z"}`
    #[default]
    Json,

    /// Human-readable text
    ///
    /// Example: `[2025-01-08T10:30:45Z] [INFO ] Request processed user=alice`
    Text,
}

impl OutputFormat {
    /// Render one message as a single line, without the trailing newline
    pub fn format(
        &self,
        message: &LogMessage,
        timestamp_format: &TimestampFormat,
        use_colors: bool,
    ) -> Result<String> {
        match self {
            OutputFormat::Json => format_json(message, timestamp_format),
            OutputFormat::Text => Ok(format_text(message, timestamp_format, use_colors)),
        }
    }
}

fn format_json(message: &LogMessage, timestamp_format: &TimestampFormat) -> Result<String> {
    let mut json_obj = serde_json::Map::with_capacity(message.fields.len() + 4);

    json_obj.insert(
        "level".to_string(),
        serde_json::Value::String(message.severity.as_str().to_string()),
    );
    json_obj.insert(
        "message".to_string(),
        serde_json::Value::String(message.text.clone()),
    );
    json_obj.insert(
        "err".to_string(),
        message
            .error_string()
            .map(serde_json::Value::String)
            .unwrap_or(serde_json::Value::Null),
    );
    json_obj.insert(
        "time".to_string(),
        timestamp_format.to_json_value(&message.timestamp),
    );

    // Fields overlay the seeded keys
    for (key, value) in &message.fields {
        json_obj.insert(key.clone(), value.to_json_value());
    }

    Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
}

fn format_text(message: &LogMessage, timestamp_format: &TimestampFormat, use_colors: bool) -> String {
    let timestamp_str = timestamp_format.format(&message.timestamp);
    let level_str = colorize_level(message, use_colors);

    let mut line = format!("[{}] [{}] {}", timestamp_str, level_str, message.text);

    if !message.fields.is_empty() {
        line.push(' ');
        line.push_str(&format_fields(&message.fields));
    }
    if let Some(err) = message.error_string() {
        line.push_str(" err=");
        line.push_str(&err);
    }

    line
}

#[cfg(feature = "console")]
fn colorize_level(message: &LogMessage, use_colors: bool) -> String {
    use colored::Colorize;

    let label = message.severity.label();
    if use_colors {
        label.color(message.severity.color_code()).to_string()
    } else {
        label.to_string()
    }
}

#[cfg(not(feature = "console"))]
fn colorize_level(message: &LogMessage, _use_colors: bool) -> String {
    message.severity.label().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, Severity};
    use std::sync::Arc;

    fn sample() -> LogMessage {
        let mut msg = LogMessage::new(Severity::Warn, "Disk almost full");
        msg.fields.insert("mount".into(), FieldValue::from("/var"));
        msg.fields.insert("used_pct".into(), FieldValue::from(93));
        msg
    }

    #[test]
    fn test_json_format_seeds_keys() {
        let line = OutputFormat::Json
            .format(&sample(), &TimestampFormat::Rfc3339, false)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["message"], "Disk almost full");
        assert!(parsed["err"].is_null());
        assert!(parsed["time"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(parsed["mount"], "/var");
        assert_eq!(parsed["used_pct"], 93);
    }

    #[test]
    fn test_json_fields_override_seeded_keys() {
        let mut msg = sample();
        msg.fields.insert("level".into(), FieldValue::from("custom"));
        msg.fields.insert("time".into(), FieldValue::from(0));

        let line = OutputFormat::Json
            .format(&msg, &TimestampFormat::Rfc3339, false)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "custom");
        assert_eq!(parsed["time"], 0);
    }

    #[test]
    fn test_json_is_single_line() {
        let msg = LogMessage::new(Severity::Info, "line one\nline two");
        let line = OutputFormat::Json
            .format(&msg, &TimestampFormat::Rfc3339, false)
            .unwrap();
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn test_text_format() {
        let err: crate::core::SharedError =
            Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "no space"));
        let msg = sample().with_error(err);

        let line = OutputFormat::Text
            .format(&msg, &TimestampFormat::Rfc3339, false)
            .unwrap();
        assert!(line.contains("[WARN ] Disk almost full"));
        assert!(line.contains("mount=/var used_pct=93"));
        assert!(line.ends_with("err=no space"));
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
