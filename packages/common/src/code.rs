//! Error codes and the built-in code table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Codes below this value are reserved for the built-in classifications.
pub const RESERVED_CODES: u32 = 100;

/// Classification of an error, independent of its message text.
///
/// Codes `0..RESERVED_CODES` are owned by this library. Applications register
/// their own codes (with a description) starting at [`RESERVED_CODES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(pub u32);

impl Code {
    /// The error has not been classified.
    pub const UNKNOWN: Code = Code(0);
    /// An attempt to create an entity failed because one already exists.
    pub const ALREADY_EXISTS: Code = Code(1);
    /// Some requested entity was not found.
    pub const NOT_FOUND: Code = Code(2);
    /// The caller specified an invalid argument.
    pub const INVALID_ARGUMENT: Code = Code(3);
    /// The syntax of the request cannot be interpreted (eg. a JSON decoding error).
    pub const MALFORMED_REQUEST: Code = Code(4);
    /// The request does not carry valid authentication credentials.
    pub const UNAUTHENTICATED: Code = Code(5);
    /// The caller is known but lacks permission for the operation.
    pub const PERMISSION_DENIED: Code = Code(6);
    /// A system constraint was violated, eg. a duplicate key on a unique index.
    pub const CONSTRAINT_VIOLATED: Code = Code(7);
    /// The request is not supported.
    pub const NOT_SUPPORTED: Code = Code(8);
    /// The request is not implemented.
    pub const NOT_IMPLEMENTED: Code = Code(9);
    /// A required parameter is missing or empty.
    pub const MISSING_PARAMETER: Code = Code(10);
    /// The operation exceeded its deadline before completion.
    pub const DEADLINE_EXCEEDED: Code = Code(11);
    /// The operation was canceled before completion.
    pub const CANCELED: Code = Code(12);
    /// A limited resource (rate limit, disk space) has been exhausted.
    pub const RESOURCE_EXHAUSTED: Code = Code(13);
    /// The service is unavailable for processing requests.
    pub const UNAVAILABLE: Code = Code(14);

    /// Create a code from its numeric value
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Numeric value of the code
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether the code falls in the range owned by this library
    #[inline]
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        self.0 < RESERVED_CODES
    }

    /// Description of a built-in code, `None` for anything else
    #[must_use]
    pub fn builtin_description(self) -> Option<&'static str> {
        BUILTIN_CODES
            .iter()
            .find(|(code, _)| *code == self)
            .map(|(_, description)| *description)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Code {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Code> for u32 {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Built-in codes with their human readable descriptions
pub const BUILTIN_CODES: &[(Code, &str)] = &[
    (Code::UNKNOWN, "unknown"),
    (Code::ALREADY_EXISTS, "already exists"),
    (Code::NOT_FOUND, "not found"),
    (Code::INVALID_ARGUMENT, "invalid argument"),
    (Code::MALFORMED_REQUEST, "malformed request"),
    (Code::UNAUTHENTICATED, "unauthenticated"),
    (Code::PERMISSION_DENIED, "permission denied"),
    (Code::CONSTRAINT_VIOLATED, "constraint violated"),
    (Code::NOT_SUPPORTED, "not supported"),
    (Code::NOT_IMPLEMENTED, "not implemented"),
    (Code::MISSING_PARAMETER, "parameter is missing"),
    (Code::DEADLINE_EXCEEDED, "deadline exceeded"),
    (Code::CANCELED, "canceled"),
    (Code::RESOURCE_EXHAUSTED, "resource exhausted"),
    (Code::UNAVAILABLE, "unavailable"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_inside_reserved_range() {
        for (code, description) in BUILTIN_CODES {
            assert!(code.is_reserved(), "{code} should be reserved");
            assert!(!description.is_empty());
        }
    }

    #[test]
    fn builtin_description_lookup() {
        assert_eq!(Code::NOT_FOUND.builtin_description(), Some("not found"));
        assert_eq!(
            Code::MISSING_PARAMETER.builtin_description(),
            Some("parameter is missing")
        );
        assert_eq!(Code::new(RESERVED_CODES).builtin_description(), None);
    }

    #[test]
    fn reserved_boundary() {
        assert!(Code::new(RESERVED_CODES - 1).is_reserved());
        assert!(!Code::new(RESERVED_CODES).is_reserved());
        assert_eq!(Code::default(), Code::UNKNOWN);
    }
}
