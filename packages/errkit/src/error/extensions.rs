//! `Result` extensions for attaching structure at the point of failure

use super::types::{BoxError, CodedError};
use errkit_common::Code;
use std::panic::Location;

/// Structured-error helpers for any `Result` whose error can be boxed
pub trait ResultExt<T> {
    /// Wrap the error with a local message
    fn wrap_err(self, message: impl Into<String>) -> Result<T, CodedError>;

    /// Set the code, wrapping the error unless it already is a [`CodedError`]
    fn with_code(self, code: Code) -> Result<T, CodedError>;

    /// Mark the error silent, wrapping it unless it already is a [`CodedError`]
    fn silenced(self) -> Result<T, CodedError>;

    /// Mark the error benign, wrapping it unless it already is a [`CodedError`]
    fn mark_benign_because(self, reason: impl Into<String>) -> Result<T, CodedError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn wrap_err(self, message: impl Into<String>) -> Result<T, CodedError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(CodedError::wrap_with(err, message)),
        }
    }

    #[track_caller]
    fn with_code(self, code: Code) -> Result<T, CodedError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(CodedError::promote(err.into(), Location::caller()).with_code(code)),
        }
    }

    #[track_caller]
    fn silenced(self) -> Result<T, CodedError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(CodedError::promote(err.into(), Location::caller()).silence()),
        }
    }

    #[track_caller]
    fn mark_benign_because(self, reason: impl Into<String>) -> Result<T, CodedError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(CodedError::promote(err.into(), Location::caller())
                .mark_benign_because(reason)),
        }
    }
}
