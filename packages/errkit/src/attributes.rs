//! Typed attributes keyed by arbitrary comparable values
//!
//! Keys are compared by concrete type first and value second, so a newtype
//! key never collides with the primitive it wraps:
//!
//! ```
//! use errkit::CodedError;
//!
//! #[derive(Debug, PartialEq)]
//! struct RequestId(u32);
//!
//! let err = CodedError::new("lookup failed")
//!     .with_attr(RequestId(1), "req-a")
//!     .with_attr(1u32, "plain");
//!
//! assert_eq!(errkit::attribute::<&str>(&err, &RequestId(1)), Some(&"req-a"));
//! assert_eq!(errkit::attribute::<&str>(&err, &1u32), Some(&"plain"));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased attribute value
pub type AttrValue = dyn Any + Send + Sync;

/// Anything usable as an attribute key
///
/// Implemented for every `'static` type that is `PartialEq + Debug + Send + Sync`.
pub trait AttrKey: Any + Send + Sync + fmt::Debug {
    /// Same concrete type and equal value
    fn key_eq(&self, other: &dyn AttrKey) -> bool;

    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T> AttrKey for T
where
    T: Any + PartialEq + Send + Sync + fmt::Debug,
{
    fn key_eq(&self, other: &dyn AttrKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A single key/value attribute attached to an error
#[derive(Debug, Clone)]
pub struct Attribute {
    key: Arc<dyn AttrKey>,
    value: Arc<AttrValue>,
}

impl Attribute {
    /// Create an attribute
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: AttrKey,
        V: Any + Send + Sync,
    {
        Self {
            key: Arc::new(key),
            value: Arc::new(value),
        }
    }

    /// The attribute key
    #[must_use]
    pub fn key(&self) -> &dyn AttrKey {
        &*self.key
    }

    /// The attribute value
    #[must_use]
    pub fn value(&self) -> &AttrValue {
        &*self.value
    }

    /// Whether this attribute is stored under `key`
    #[must_use]
    pub fn matches(&self, key: &dyn AttrKey) -> bool {
        (*self.key).key_eq(key)
    }
}

/// First value stored under `key`; earlier entries shadow later duplicates.
pub(crate) fn find_attribute<'a>(
    attributes: &'a [Attribute],
    key: &dyn AttrKey,
) -> Option<&'a AttrValue> {
    attributes
        .iter()
        .find(|attribute| attribute.matches(key))
        .map(Attribute::value)
}
