//! Structured log records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Detail useful while developing.
    Debug,
    /// Routine operational events.
    Info,
    /// Something surprising that did not stop the operation.
    Warn,
    /// The operation failed.
    Error,
}

impl Level {
    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured log event: timestamp, level, message, and an ordered list of
/// key/value attributes.
///
/// Sinks own everything past this point; the record neither formats nor
/// transmits itself.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    timestamp: DateTime<Utc>,
    level: Level,
    message: String,
    attrs: Vec<(String, Value)>,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    /// Appends one structured attribute.
    pub fn add_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attrs.push((key.into(), value.into()));
    }

    /// The record's severity.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The record's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The time the record was created.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The attributes appended so far, in append order.
    #[must_use]
    pub fn attrs(&self) -> &[(String, Value)] {
        &self.attrs
    }

    /// Encodes the record as a JSON object with `time`, `level`, `msg`, and
    /// one member per attribute.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "time".to_string(),
            Value::String(self.timestamp.to_rfc3339()),
        );
        map.insert(
            "level".to_string(),
            Value::String(self.level.as_str().to_string()),
        );
        map.insert("msg".to_string(), Value::String(self.message.clone()));
        for (key, value) in &self.attrs {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}
