//! Promotion of foreign errors into [`CodedError`]

use crate::chain::chain;
use crate::error::{BoxError, CodedError, SharedError};
use crate::registry::registry;
use crate::traverse::as_coded;
use errkit_common::Code;
use std::io;
use std::panic::Location;
use std::sync::Arc;

/// Convert any error into a [`CodedError`]; never fails
///
/// A structured error at the top is returned unchanged and one found deeper
/// in the chain is returned as-is (same identity). Otherwise the registered
/// conversions run in order and the first match wins. Errors nothing
/// recognises are wrapped transparently with [`Code::UNKNOWN`].
///
/// Converted and wrapped results are anchored at the caller.
#[track_caller]
pub fn convert<E>(err: E) -> CodedError
where
    E: Into<BoxError>,
{
    let location = Location::caller();
    let boxed: BoxError = err.into();
    let boxed = match boxed.downcast::<CodedError>() {
        Ok(coded) => return *coded,
        Err(other) => other,
    };

    let shared: SharedError = Arc::from(boxed);
    if let Some(found) = as_coded(&*shared) {
        return found.clone();
    }

    let registry = registry();
    for conversion in registry.conversions() {
        if let Some(converted) = conversion(&shared) {
            tracing::debug!(code = %converted.code(), "Foreign error converted");
            return converted.anchored_at(location);
        }
    }
    CodedError::wrap_shared_at(shared, location)
}

/// Recognise task cancellation: a cancelled [`tokio::task::JoinError`] or a
/// dropped [`futures::channel::oneshot`] sender
pub fn canceled(err: &SharedError) -> Option<CodedError> {
    let found = chain(&**err).any(|link| {
        link.is::<futures::channel::oneshot::Canceled>()
            || link
                .downcast_ref::<tokio::task::JoinError>()
                .is_some_and(tokio::task::JoinError::is_cancelled)
    });
    found.then(|| CodedError::wrap_shared(Arc::clone(err)).with_code(Code::CANCELED))
}

/// Recognise an expired deadline: [`tokio::time::error::Elapsed`] or an
/// I/O error of kind [`io::ErrorKind::TimedOut`]
pub fn deadline_exceeded(err: &SharedError) -> Option<CodedError> {
    let expired = chain(&**err).any(|link| {
        link.is::<tokio::time::error::Elapsed>()
            || link
                .downcast_ref::<io::Error>()
                .is_some_and(|io_err| io_err.kind() == io::ErrorKind::TimedOut)
    });
    expired.then(|| CodedError::wrap_shared(Arc::clone(err)).with_code(Code::DEADLINE_EXCEEDED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_out_io_errors_exceed_the_deadline() {
        let err: SharedError = Arc::new(io::Error::from(io::ErrorKind::TimedOut));
        let converted = deadline_exceeded(&err).map(|coded| coded.code());
        assert_eq!(converted, Some(Code::DEADLINE_EXCEEDED));
        assert!(canceled(&err).is_none());
    }

    #[test]
    fn other_io_errors_are_not_recognised() {
        let err: SharedError = Arc::new(io::Error::from(io::ErrorKind::NotFound));
        assert!(deadline_exceeded(&err).is_none());
        assert!(canceled(&err).is_none());
    }

    #[test]
    fn dropped_oneshot_sender_is_canceled() {
        let err: SharedError = Arc::new(futures::channel::oneshot::Canceled);
        let converted = canceled(&err).map(|coded| coded.code());
        assert_eq!(converted, Some(Code::CANCELED));
    }
}
