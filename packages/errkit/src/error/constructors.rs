//! Error constructors and methods

use super::types::{BoxError, CodedError, ErrorInner, SharedError};
use crate::attributes::{AttrKey, Attribute};
use crate::details::Auxiliary;
use crate::registry::registry;
use crate::stack::{Call, StackCapture};
use errkit_common::Code;
use std::any::Any;
use std::panic::Location;
use std::sync::Arc;

fn share<E>(err: E) -> SharedError
where
    E: Into<BoxError>,
{
    let boxed: BoxError = err.into();
    Arc::from(boxed)
}

impl CodedError {
    /// Create a root error with the given message and code `UNKNOWN`
    #[track_caller]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller())
    }

    /// Wrap an error without adding text; rendering defers to the parent
    #[track_caller]
    #[must_use]
    pub fn wrap<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::build(String::new(), Some(share(err)), Location::caller())
    }

    /// Wrap an error with a local message rendered in front of the parent's
    #[track_caller]
    #[must_use]
    pub fn wrap_with<E>(err: E, message: impl Into<String>) -> Self
    where
        E: Into<BoxError>,
    {
        Self::build(message.into(), Some(share(err)), Location::caller())
    }

    /// Wrap an error that is already shared, without re-boxing it
    #[track_caller]
    #[must_use]
    pub fn wrap_shared(parent: SharedError) -> Self {
        Self::build(String::new(), Some(parent), Location::caller())
    }

    pub(crate) fn wrap_shared_at(parent: SharedError, location: &'static Location<'static>) -> Self {
        Self::build(String::new(), Some(parent), location)
    }

    /// Keep a boxed structured error as-is, wrap anything else transparently
    pub(crate) fn promote(err: BoxError, location: &'static Location<'static>) -> Self {
        match err.downcast::<CodedError>() {
            Ok(coded) => *coded,
            Err(other) => Self::build(String::new(), Some(Arc::from(other)), location),
        }
    }

    /// Replace the captured call site
    pub(crate) fn anchored_at(mut self, location: &'static Location<'static>) -> Self {
        self.inner_mut().stack = StackCapture::capture(location);
        self
    }

    fn build(
        message: String,
        parent: Option<SharedError>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                message,
                parent,
                code: Code::UNKNOWN,
                silent: false,
                benign: false,
                benign_reason: String::new(),
                retriable: false,
                auxiliary: Auxiliary::new(),
                attributes: Vec::new(),
                stack: StackCapture::capture(location),
            }),
        }
    }

    fn inner_mut(&mut self) -> &mut ErrorInner {
        Arc::make_mut(&mut self.inner)
    }

    /// Set the error code
    #[must_use]
    pub fn with_code(mut self, code: Code) -> Self {
        self.inner_mut().code = code;
        self
    }

    /// Replace the local message; the parent is untouched
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.inner_mut().message = message.into();
        self
    }

    /// Mark the error as silent: it should not be logged at all
    #[must_use]
    pub fn silence(mut self) -> Self {
        self.inner_mut().silent = true;
        self
    }

    /// Mark the error as benign, keeping any reason already given
    #[must_use]
    pub fn mark_benign(mut self) -> Self {
        self.inner_mut().benign = true;
        self
    }

    /// Mark the error as benign and record why
    #[must_use]
    pub fn mark_benign_because(mut self, reason: impl Into<String>) -> Self {
        let inner = self.inner_mut();
        inner.benign = true;
        inner.benign_reason = reason.into();
        self
    }

    /// Mark the failed operation as worth retrying
    #[must_use]
    pub fn mark_retriable(mut self) -> Self {
        self.inner_mut().retriable = true;
        self
    }

    /// Attach one auxiliary value; a later value for the same key replaces it
    #[must_use]
    pub fn with_aux(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.inner_mut()
            .auxiliary
            .insert(key.into(), value.into());
        self
    }

    /// Attach a batch of auxiliary values
    #[must_use]
    pub fn with_aux_map<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.inner_mut().auxiliary.extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        self
    }

    /// Append a typed attribute
    ///
    /// Duplicates are kept; lookups return the first one inserted.
    #[must_use]
    pub fn with_attr<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AttrKey,
        V: Any + Send + Sync,
    {
        self.inner_mut()
            .attributes
            .push(Attribute::new(key, value));
        self
    }

    /// The error code of this node
    #[must_use]
    pub fn code(&self) -> Code {
        self.inner.code
    }

    /// The local message of this node
    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The wrapped error, if any
    #[must_use]
    pub fn parent(&self) -> Option<&SharedError> {
        self.inner.parent.as_ref()
    }

    /// Attributes attached to this node, in insertion order
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.inner.attributes
    }

    /// Where this node was created
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.inner.stack.origin()
    }

    /// Call stack at creation, innermost caller first
    ///
    /// Symbolised on first access and cached afterwards.
    #[must_use]
    pub fn stack_trace(&self) -> &[Call] {
        self.inner.stack.calls()
    }

    /// Description of this node's code in the active registry, empty if unmapped
    #[must_use]
    pub fn code_description(&self) -> String {
        registry()
            .code_description(self.inner.code)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Whether both handles refer to the same error node
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Create a not found error
    #[track_caller]
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller()).with_code(Code::NOT_FOUND)
    }

    /// Create an already exists error
    #[track_caller]
    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller()).with_code(Code::ALREADY_EXISTS)
    }

    /// Create an invalid argument error
    #[track_caller]
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller()).with_code(Code::INVALID_ARGUMENT)
    }

    /// Create a permission denied error
    #[track_caller]
    #[must_use]
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller()).with_code(Code::PERMISSION_DENIED)
    }

    /// Create an unauthenticated error
    #[track_caller]
    #[must_use]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller()).with_code(Code::UNAUTHENTICATED)
    }

    /// Create an unavailable error
    #[track_caller]
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller()).with_code(Code::UNAVAILABLE)
    }

    /// Create a not implemented error
    #[track_caller]
    #[must_use]
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, Location::caller()).with_code(Code::NOT_IMPLEMENTED)
    }

    /// Wrap an error with a message and the not found code
    #[track_caller]
    #[must_use]
    pub fn wrap_not_found<E>(err: E, message: impl Into<String>) -> Self
    where
        E: Into<BoxError>,
    {
        Self::build(message.into(), Some(share(err)), Location::caller()).with_code(Code::NOT_FOUND)
    }
}
