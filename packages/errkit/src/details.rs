//! Read-only capability contract shared by structured and foreign errors
//!
//! Chain traversal never asks "is this a [`CodedError`]?" except for nominal
//! extraction. It asks each link for its [`ErrorDetails`] instead. A foreign
//! error type joins in by implementing the trait and registering itself with
//! [`Registry::register_details`](crate::Registry::register_details).

use crate::attributes::{AttrKey, AttrValue};
use crate::error::CodedError;
use errkit_common::Code;
use std::collections::HashMap;
use std::error::Error as StdError;

/// Auxiliary diagnostic data, keyed by name
pub type Auxiliary = HashMap<String, serde_json::Value>;

/// Recovers the [`ErrorDetails`] view of one chain link, if its type is known
pub type DetailsProbe =
    for<'a> fn(&'a (dyn StdError + 'static)) -> Option<&'a dyn ErrorDetails>;

/// Accessors consulted by every chain traversal
///
/// Every method has a neutral default, so implementors only override what
/// their type actually carries.
pub trait ErrorDetails {
    /// Classification carried by this link
    fn error_code(&self) -> Option<Code> {
        None
    }

    /// Whether this link asks for the error not to be logged
    fn is_silent(&self) -> bool {
        false
    }

    /// `Some(reason)` when this link is benign; the reason may be empty
    fn benign_reason(&self) -> Option<&str> {
        None
    }

    /// Whether the failed operation may succeed on retry
    fn is_retriable(&self) -> bool {
        false
    }

    /// Auxiliary data attached to this link
    fn auxiliary(&self) -> Option<&Auxiliary> {
        None
    }

    /// Attribute stored on this link under `key`
    fn attribute(&self, _key: &dyn AttrKey) -> Option<&AttrValue> {
        None
    }
}

/// Probe for a concrete foreign type, suitable for [`DetailsProbe`]
pub fn probe<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a dyn ErrorDetails>
where
    T: ErrorDetails + StdError + 'static,
{
    err.downcast_ref::<T>()
        .map(|details| details as &dyn ErrorDetails)
}

/// Details view of one link: structured errors natively, others via probes.
pub(crate) fn details_of<'a>(
    err: &'a (dyn StdError + 'static),
    probes: &[DetailsProbe],
) -> Option<&'a dyn ErrorDetails> {
    if let Some(coded) = err.downcast_ref::<CodedError>() {
        return Some(coded);
    }
    probes.iter().find_map(|probe| probe(err))
}
