//! Reports error-level events from a structured logging pipeline to Rollbar.
//!
//! [`RollbarFilter`] sits in a pipeline's filter chain and consumes every
//! event handed to it. Events below [`Severity::Error`] are dropped.
//! Everything else is reduced to a single error value (taken from the
//! `"err"`/`"error"` data keys, or synthesized from the message) plus
//! stringified extras, and dispatched through the [`Client`] capability,
//! picking the error or critical operation to match the event's severity and
//! the stack variant whenever the error exposes one. Credentials embedded in
//! URL-carrying errors are scrubbed before dispatch.
//!
//! Reporting is strictly fire-and-forget: a failing or even panicking client
//! surfaces as a single [`log`] record below the error level, and the filter
//! still tells the pipeline the event was handled. A reporting outage can
//! therefore never cascade into the log pipeline itself.
//!
//! # Examples
//!
//! ```
//! use rollbar_filter::{
//!     Client, ErrorLike, Event, Extras, Filter, ReportResult, RollbarFilter, Severity, Uuid,
//! };
//!
//! struct Stdout;
//!
//! impl Client for Stdout {
//!     fn error(&self, err: &dyn ErrorLike, _extras: &Extras) -> ReportResult {
//!         println!("rollbar: {err}");
//!         Ok(Uuid::nil())
//!     }
//!     fn error_stack(&self, err: &dyn ErrorLike, _stack: &[usize], extras: &Extras) -> ReportResult {
//!         self.error(err, extras)
//!     }
//!     fn critical(&self, err: &dyn ErrorLike, extras: &Extras) -> ReportResult {
//!         self.error(err, extras)
//!     }
//!     fn critical_stack(&self, err: &dyn ErrorLike, _stack: &[usize], extras: &Extras) -> ReportResult {
//!         self.error(err, extras)
//!     }
//! }
//!
//! let filter = RollbarFilter::new(Stdout);
//! let handled = filter.apply(&Event::new(Severity::Error).with_message("ERROR!"));
//! assert!(handled);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod client;
mod converters;
mod errorlike;
mod filter;
mod pipeline;
mod scrub;

pub use crate::client::{Client, ClientError, Extras, ReportResult};
pub use crate::converters::{instruction_addrs, value_to_string};
pub use crate::errorlike::{ErrorLike, MessageError, Traced, TransportError};
pub use crate::filter::RollbarFilter;
pub use crate::pipeline::{Event, Filter, Severity, Value};
pub use crate::scrub::{scrub_url_error, ScrubbedError};

pub use backtrace::Backtrace;
pub use uuid::Uuid;
