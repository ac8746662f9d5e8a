//! Core error types and definitions

use crate::attributes::{find_attribute, AttrKey, AttrValue, Attribute};
use crate::details::{Auxiliary, ErrorDetails};
use crate::stack::StackCapture;
use errkit_common::Code;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Owned, type-erased error accepted wherever an error is wrapped
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Shared, type-erased error used as the parent of a [`CodedError`]
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Structured error node
///
/// Carries a local message, an optional parent, a [`Code`], disposition
/// flags, auxiliary data, typed attributes and the call site it was created
/// at. Cloning is cheap and keeps identity (see [`CodedError::ptr_eq`]).
///
/// Builders take and return `self`. Construct the error fully before sharing
/// it across threads: a builder called on a shared clone modifies a private
/// copy and leaves the other holders untouched.
#[derive(Clone)]
pub struct CodedError {
    pub(crate) inner: Arc<ErrorInner>,
}

#[derive(Debug, Clone)]
pub(crate) struct ErrorInner {
    /// Local text, independent of the parent's text
    pub message: String,
    /// Wrapped error, if any
    pub parent: Option<SharedError>,
    /// Classification, `Code::UNKNOWN` until set
    pub code: Code,
    pub silent: bool,
    pub benign: bool,
    pub benign_reason: String,
    pub retriable: bool,
    pub auxiliary: Auxiliary,
    /// Insertion ordered; readers take the first match
    pub attributes: Vec<Attribute>,
    pub stack: StackCapture,
}

impl fmt::Debug for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = &self.inner;
        f.debug_struct("CodedError")
            .field("code", &inner.code)
            .field("message", &inner.message)
            .field("silent", &inner.silent)
            .field("benign", &inner.benign)
            .field("retriable", &inner.retriable)
            .field("auxiliary", &inner.auxiliary)
            .field("attributes", &inner.attributes.len())
            .field("parent", &inner.parent)
            .finish_non_exhaustive()
    }
}

impl ErrorDetails for CodedError {
    fn error_code(&self) -> Option<Code> {
        Some(self.inner.code)
    }

    fn is_silent(&self) -> bool {
        self.inner.silent
    }

    fn benign_reason(&self) -> Option<&str> {
        self.inner
            .benign
            .then_some(self.inner.benign_reason.as_str())
    }

    fn is_retriable(&self) -> bool {
        self.inner.retriable
    }

    fn auxiliary(&self) -> Option<&Auxiliary> {
        Some(&self.inner.auxiliary)
    }

    fn attribute(&self, key: &dyn AttrKey) -> Option<&AttrValue> {
        find_attribute(&self.inner.attributes, key)
    }
}
