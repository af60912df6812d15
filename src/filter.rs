//! The extraction and dispatch core.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use uuid::Uuid;

use crate::client::{Client, Extras};
use crate::converters::{instruction_addrs, value_to_string};
use crate::errorlike::{ErrorLike, MessageError};
use crate::pipeline::{Event, Filter, Severity, Value};
use crate::scrub::{scrub_url_error, ScrubbedError};

/// Target for the filter's own diagnostics. These are emitted at Info so a
/// report failure can never feed back into an error-level filter chain.
const LOG_TARGET: &str = "rollbar";

/// Data keys inspected for the reportable error, in precedence order.
const REPORT_KEYS: [&str; 2] = ["err", "error"];

/// A pipeline filter which reports error-level events to Rollbar.
///
/// The filter handles every event it sees. Events below [`Severity::Error`]
/// are dropped; everything else is reduced to a single error value plus
/// string extras and dispatched through the bound [`Client`]. Nothing that
/// happens while reporting, a client failure or even a panic, escapes to the
/// pipeline.
pub struct RollbarFilter<C> {
    client: C,
}

impl<C: Client> RollbarFilter<C> {
    /// Creates a filter bound to the given client.
    pub fn new(client: C) -> Self {
        RollbarFilter { client }
    }

    /// Picks the client operation matching the severity and the presence of
    /// a stack, and runs it. Severities that cannot be mapped are skipped.
    fn report(&self, severity: Severity, error: &dyn ErrorLike, extras: &Extras) {
        let outcome = match error.backtrace().map(instruction_addrs) {
            Some(stack) => match severity {
                Severity::Error => self.client.error_stack(error, &stack, extras),
                Severity::Critical | Severity::Alert | Severity::Emergency => {
                    self.client.critical_stack(error, &stack, extras)
                }
                _ => return,
            },
            None => match severity {
                Severity::Error => self.client.error(error, extras),
                Severity::Critical | Severity::Alert | Severity::Emergency => {
                    self.client.critical(error, extras)
                }
                _ => return,
            },
        };

        if let Err(err) = outcome {
            log::info!(
                target: LOG_TARGET,
                "report failed: err={} uuid={} priority={} action=rollbar-report",
                err,
                err.uuid().unwrap_or_else(Uuid::nil),
                severity,
            );
        }
    }
}

impl<C: Client> Filter for RollbarFilter<C> {
    fn apply(&self, event: &Event) -> bool {
        if event.severity < Severity::Error {
            return true;
        }

        // The first canonical key holding an error-shaped value wins;
        // failing that, the first canonical key present at all.
        let reported: Option<&str> = REPORT_KEYS
            .iter()
            .copied()
            .find(|key| matches!(event.data.get(*key), Some(Value::Error(_))))
            .or_else(|| {
                REPORT_KEYS
                    .iter()
                    .copied()
                    .find(|key| event.data.contains_key(*key))
            });

        let mut extras = Extras::new();
        for (key, value) in &event.data {
            if reported != Some(key.as_str()) {
                extras.insert(key.clone(), value_to_string(value));
            }
        }

        let extracted = match reported.and_then(|key| event.data.get(key)) {
            Some(Value::Error(err)) => match scrub_url_error(err.as_ref()) {
                Some(scrubbed) => Extracted::Scrubbed(scrubbed),
                None => Extracted::Carried(err.as_ref()),
            },
            Some(value) => Extracted::Synthesized(MessageError::new(value_to_string(value))),
            None if !event.message.is_empty() => {
                Extracted::Synthesized(MessageError::new(event.message.clone()))
            }
            // No error, no message, no extras: nothing to report.
            None if extras.is_empty() => return true,
            // Extras alone are still worth a report; give them an empty
            // synthesized error to hang off.
            None => Extracted::Synthesized(MessageError::new("")),
        };

        let dispatch = panic::catch_unwind(AssertUnwindSafe(|| {
            self.report(event.severity, extracted.as_error_like(), &extras)
        }));
        if let Err(payload) = dispatch {
            log::info!(
                target: LOG_TARGET,
                "panic while reporting to rollbar: panic=true recover=true err={}",
                panic_message(&*payload),
            );
        }

        true
    }
}

/// The single error value chosen for one event.
enum Extracted<'a> {
    /// The error carried by the event, used as-is.
    Carried(&'a dyn ErrorLike),
    /// The carried error with its URL credentials removed.
    Scrubbed(ScrubbedError),
    /// An error synthesized from the message or a non-error value.
    Synthesized(MessageError),
}

impl Extracted<'_> {
    fn as_error_like(&self) -> &dyn ErrorLike {
        match self {
            Extracted::Carried(err) => *err,
            Extracted::Scrubbed(err) => err,
            Extracted::Synthesized(err) => err,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    match payload.downcast_ref::<&'static str>() {
        Some(s) => s,
        None => match payload.downcast_ref::<String>() {
            Some(s) => &s[..],
            None => "Box<Any>",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_messages_are_extracted() {
        let payload: Box<dyn Any + Send> = Box::new("err is nil");
        assert_eq!(panic_message(&*payload), "err is nil");

        let payload: Box<dyn Any + Send> = Box::new(format!("index {} out of range", 4));
        assert_eq!(panic_message(&*payload), "index 4 out of range");

        let payload: Box<dyn Any + Send> = Box::new(17usize);
        assert_eq!(panic_message(&*payload), "Box<Any>");
    }
}
