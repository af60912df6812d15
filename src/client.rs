//! The reporter capability the filter dispatches to.

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use uuid::Uuid;

use crate::errorlike::ErrorLike;

/// Contextual metadata attached to a report.
pub type Extras = BTreeMap<String, String>;

/// Outcome of a single reporting operation: the UUID the backend assigned to
/// the item.
pub type ReportResult = Result<Uuid, ClientError>;

/// Failure returned by a [`Client`] operation.
///
/// The backend may assign an item uuid before rejecting a report; when the
/// implementation got that far, the uuid rides along so diagnostics can name
/// the item.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct ClientError {
    source: Box<dyn Error + Send + Sync>,
    uuid: Option<Uuid>,
}

impl ClientError {
    /// Wraps any error as a client failure.
    pub fn new<E: Error + Send + Sync + 'static>(err: E) -> Self {
        ClientError {
            source: Box::new(err),
            uuid: None,
        }
    }

    /// Attaches the uuid the backend assigned before failing.
    #[must_use]
    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// The uuid the backend assigned, if the report got that far.
    pub fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }
}

/// A Rollbar client capable of reporting at the error and critical levels,
/// with or without an accompanying stack.
///
/// Transport, batching and retry are entirely the implementation's concern;
/// the filter selects exactly one operation per event and observes the
/// outcome. Implementations are shared across threads and manage their own
/// synchronization; operations may block on network I/O.
pub trait Client: Send + Sync {
    /// Reports an error-level item.
    fn error(&self, error: &dyn ErrorLike, extras: &Extras) -> ReportResult;

    /// Reports an error-level item with the given program counters.
    fn error_stack(&self, error: &dyn ErrorLike, stack: &[usize], extras: &Extras) -> ReportResult;

    /// Reports a critical-level item.
    fn critical(&self, error: &dyn ErrorLike, extras: &Extras) -> ReportResult;

    /// Reports a critical-level item with the given program counters.
    fn critical_stack(&self, error: &dyn ErrorLike, stack: &[usize], extras: &Extras)
        -> ReportResult;
}

impl<C: Client + ?Sized> Client for Arc<C> {
    fn error(&self, error: &dyn ErrorLike, extras: &Extras) -> ReportResult {
        (**self).error(error, extras)
    }

    fn error_stack(&self, error: &dyn ErrorLike, stack: &[usize], extras: &Extras) -> ReportResult {
        (**self).error_stack(error, stack, extras)
    }

    fn critical(&self, error: &dyn ErrorLike, extras: &Extras) -> ReportResult {
        (**self).critical(error, extras)
    }

    fn critical_stack(
        &self,
        error: &dyn ErrorLike,
        stack: &[usize],
        extras: &Extras,
    ) -> ReportResult {
        (**self).critical_stack(error, stack, extras)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errorlike::MessageError;

    #[test]
    fn client_errors_carry_the_backend_uuid_when_present() {
        let plain = ClientError::new(MessageError::new("access token rejected"));
        assert_eq!(plain.to_string(), "access token rejected");
        assert_eq!(plain.uuid(), None);

        let id = Uuid::new_v4();
        let rejected = ClientError::new(MessageError::new("access token rejected")).with_uuid(id);
        assert_eq!(rejected.uuid(), Some(id));
    }
}
