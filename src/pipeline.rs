//! Vocabulary shared with the logging pipeline.
//!
//! The pipeline owns the event shape and the severity taxonomy; this module
//! mirrors them so a filter can be written against a stable contract. Events
//! flow through a chain of [`Filter`]s, each of which may consume the event
//! by returning `true`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::errorlike::ErrorLike;

/// Severity of a log event, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Verbose developer output.
    Debug,
    /// Routine operational messages.
    Info,
    /// Something unexpected that did not fail the operation.
    Warning,
    /// An operation failed.
    Error,
    /// A failure that needs prompt attention.
    Critical,
    /// A failure that needs immediate attention.
    Alert,
    /// The system is unusable.
    Emergency,
}

impl Severity {
    /// The pipeline's textual form of the severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Alert => "alert",
            Severity::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value attached to a log event.
///
/// The pipeline attaches arbitrarily typed values; the filter only ever
/// inspects the variant tag, either to find an error-shaped value or to
/// render the value into report extras.
#[derive(Debug)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A plain string.
    String(String),
    /// A point-in-time timestamp.
    Timestamp(DateTime<Utc>),
    /// An arbitrary structured payload.
    Json(serde_json::Value),
    /// An error carried by the event.
    Error(Box<dyn ErrorLike>),
}

impl Value {
    /// Wraps an error value.
    pub fn error<E: ErrorLike>(err: E) -> Self {
        Value::Error(Box::new(err))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

/// A structured log event passed down the pipeline's filter chain.
///
/// Filters only read events; the pipeline constructs one per log call.
#[derive(Debug)]
pub struct Event {
    /// Severity assigned by the pipeline.
    pub severity: Severity,
    /// Free-text message, possibly empty.
    pub message: String,
    /// Structured data attached to the log call.
    pub data: BTreeMap<String, Value>,
}

impl Event {
    /// Creates an event with no message and no data.
    pub fn new(severity: Severity) -> Self {
        Event {
            severity,
            message: String::new(),
            data: BTreeMap::new(),
        }
    }

    /// Sets the free-text message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches a data entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// A stage in the pipeline's filter chain.
///
/// The pipeline may call a filter concurrently for independent events, so
/// implementations carry no per-event state.
pub trait Filter: Send + Sync {
    /// Inspects one event, returning `true` once the event is fully handled
    /// and must not be passed to later filters.
    fn apply(&self, event: &Event) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
        assert!(Severity::Critical < Severity::Alert);
        assert!(Severity::Alert < Severity::Emergency);
    }

    #[test]
    fn events_build_up_message_and_data() {
        let event = Event::new(Severity::Error)
            .with_message("ERROR!")
            .with("attempt", 3i64);
        assert_eq!(event.message, "ERROR!");
        assert!(matches!(event.data.get("attempt"), Some(Value::Int(3))));
    }
}
