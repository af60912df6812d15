//! Capability surface for error values carried in events.

use std::error::Error;
use std::fmt;

use backtrace::Backtrace;

/// An error value attached to a log event.
///
/// Extends [`std::error::Error`] with the two capabilities the filter probes
/// before dispatch: a call stack captured when the error was created, and an
/// embedded URL for transport-style failures. Both default to absent, so any
/// plain error type opts in with a one-line impl.
pub trait ErrorLike: Error + Send + Sync + 'static {
    /// The call stack captured at creation time, innermost frame first.
    fn backtrace(&self) -> Option<&Backtrace> {
        None
    }

    /// The URL this error relates to, when it wraps a transport failure.
    fn url(&self) -> Option<&str> {
        None
    }
}

/// An error synthesized from plain text.
///
/// Stands in when an event carries only a message, or a non-error value
/// where an error is expected.
#[derive(Debug, Clone)]
pub struct MessageError(String);

impl MessageError {
    /// Creates an error whose display form is exactly `text`.
    pub fn new(text: impl Into<String>) -> Self {
        MessageError(text.into())
    }
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for MessageError {}

impl ErrorLike for MessageError {}

/// Wraps an error and captures the call stack at the point of construction,
/// opting the error into stack reporting.
#[derive(Debug)]
pub struct Traced<E> {
    inner: E,
    backtrace: Backtrace,
}

impl<E: Error + Send + Sync + 'static> Traced<E> {
    /// Wraps `inner`, capturing the current call stack.
    pub fn new(inner: E) -> Self {
        Traced {
            inner,
            backtrace: Backtrace::new(),
        }
    }

    /// The wrapped error.
    pub fn get_ref(&self) -> &E {
        &self.inner
    }
}

impl<E: Error + Send + Sync + 'static> fmt::Display for Traced<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<E: Error + Send + Sync + 'static> Error for Traced<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

impl<E: Error + Send + Sync + 'static> ErrorLike for Traced<E> {
    fn backtrace(&self) -> Option<&Backtrace> {
        Some(&self.backtrace)
    }
}

/// A failed operation on a URL, shaped the way HTTP clients report them.
///
/// This is the concrete shape the scrubber acts on; client implementations
/// map their transport failures into it so embedded credentials never reach
/// the backend.
#[derive(Debug, thiserror::Error)]
#[error("{op} {url}: {source}")]
pub struct TransportError {
    /// The operation that failed, e.g. `"Get"`.
    pub op: String,
    /// The URL the operation was addressed to.
    pub url: String,
    /// The underlying failure.
    #[source]
    pub source: Box<dyn Error + Send + Sync>,
}

impl ErrorLike for TransportError {
    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traced_captures_a_stack() {
        let err = Traced::new(MessageError::new("hi"));
        assert_eq!(err.to_string(), "hi");
        assert_eq!(err.get_ref().to_string(), "hi");
        assert!(!err.backtrace().expect("a stack").frames().is_empty());
    }

    #[test]
    fn transport_error_displays_like_a_url_error() {
        let err = TransportError {
            op: "Get".into(),
            url: "http://127.0.0.1/".into(),
            source: Box::new(MessageError::new("connection refused")),
        };
        assert_eq!(err.to_string(), "Get http://127.0.0.1/: connection refused");
        assert_eq!(err.url(), Some("http://127.0.0.1/"));
    }
}
