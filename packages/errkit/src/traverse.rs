//! Aggregate lookups over an error chain
//!
//! Every function here walks the chain outermost first and consults the
//! [`ErrorDetails`] of each link: [`CodedError`] natively, foreign types
//! through the probes registered in the process-wide [`Registry`]. Links
//! with no known details are skipped but still followed.
//!
//! An absent error (`None`) and a chain without the requested property both
//! produce the empty answer. Nothing here panics.

use crate::attributes::{AttrKey, AttrValue};
use crate::chain::{chain, Chain, ChainRoot};
use crate::details::{details_of, Auxiliary, ErrorDetails};
use crate::error::CodedError;
use crate::registry::{registry, Registry};
use errkit_common::Code;
use std::any::Any;
use std::sync::Arc;

/// Details of every link that exposes them, outermost first
pub(crate) struct Details<'a> {
    links: Chain<'a>,
    registry: Arc<Registry>,
}

impl<'a> Iterator for Details<'a> {
    type Item = &'a dyn ErrorDetails;

    fn next(&mut self) -> Option<Self::Item> {
        let probes = self.registry.probes();
        self.links.by_ref().find_map(|link| details_of(link, probes))
    }
}

pub(crate) fn details<'a>(err: impl ChainRoot<'a>) -> Details<'a> {
    Details {
        links: chain(err),
        registry: registry(),
    }
}

/// Whether any link is marked silent
pub fn is_silent<'a>(err: impl ChainRoot<'a>) -> bool {
    details(err).any(|details| details.is_silent())
}

/// Whether any link is marked retriable
pub fn is_retriable<'a>(err: impl ChainRoot<'a>) -> bool {
    details(err).any(|details| details.is_retriable())
}

/// Reason given by the first benign link
///
/// `Some("")` means benign without a reason.
pub fn is_benign<'a>(err: impl ChainRoot<'a>) -> Option<&'a str> {
    details(err).find_map(|details| details.benign_reason())
}

/// First code other than [`Code::UNKNOWN`] found in the chain
pub fn code_of<'a>(err: impl ChainRoot<'a>) -> Code {
    details(err)
        .filter_map(|details| details.error_code())
        .find(|code| *code != Code::UNKNOWN)
        .unwrap_or(Code::UNKNOWN)
}

/// Whether any link carries `code`
pub fn has_code<'a>(err: impl ChainRoot<'a>, code: Code) -> bool {
    details(err).any(|details| details.error_code() == Some(code))
}

/// First of `codes` found in the chain
///
/// Outer links take precedence over inner ones regardless of where the code
/// sits in `codes`.
pub fn has_any_code<'a>(err: impl ChainRoot<'a>, codes: &[Code]) -> Option<Code> {
    details(err).find_map(|details| {
        let carried = details.error_code()?;
        codes.iter().copied().find(|code| *code == carried)
    })
}

/// Shorthand for `has_code(err, Code::NOT_FOUND)`
pub fn is_not_found<'a>(err: impl ChainRoot<'a>) -> bool {
    has_code(err, Code::NOT_FOUND)
}

/// Union of the auxiliary data of every link; outer links win on conflict
///
/// `None` only for an absent error.
pub fn extract_auxiliary<'a>(err: impl ChainRoot<'a>) -> Option<Auxiliary> {
    let root = err.chain_root()?;
    let mut merged = Auxiliary::new();
    for auxiliary in details(root).filter_map(|details| details.auxiliary()) {
        for (key, value) in auxiliary {
            merged
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    Some(merged)
}

/// First value stored under `key` in the chain
pub fn get_attribute<'a>(err: impl ChainRoot<'a>, key: &dyn AttrKey) -> Option<&'a AttrValue> {
    details(err).find_map(|details| details.attribute(key))
}

/// [`get_attribute`] downcast to `V`; `None` if the first match has another type
pub fn attribute<'a, V>(err: impl ChainRoot<'a>, key: &dyn AttrKey) -> Option<&'a V>
where
    V: Any,
{
    get_attribute(err, key).and_then(|value| value.downcast_ref::<V>())
}

/// First link that is a [`CodedError`]
pub fn as_coded<'a>(err: impl ChainRoot<'a>) -> Option<&'a CodedError> {
    chain(err).find_map(|link| link.downcast_ref::<CodedError>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn absent_error_answers_empty() {
        let none = None::<&CodedError>;
        assert!(!is_silent(none));
        assert!(!is_retriable(none));
        assert_eq!(is_benign(none), None);
        assert_eq!(code_of(none), Code::UNKNOWN);
        assert!(!has_code(none, Code::UNKNOWN));
        assert_eq!(has_any_code(none, &[Code::NOT_FOUND]), None);
        assert_eq!(extract_auxiliary(none), None);
        assert!(get_attribute(none, &"key").is_none());
        assert!(as_coded(none).is_none());
    }

    #[test]
    fn foreign_root_has_empty_auxiliary() {
        let err = io::Error::other("plain");
        assert_eq!(extract_auxiliary(&err), Some(Auxiliary::new()));
        assert_eq!(code_of(&err), Code::UNKNOWN);
    }

    #[test]
    fn code_of_skips_transparent_wrappers() {
        let err = CodedError::wrap(CodedError::not_found("row"));
        assert_eq!(err.code(), Code::UNKNOWN);
        assert_eq!(code_of(&err), Code::NOT_FOUND);
        assert!(is_not_found(&err));
    }

    #[test]
    fn first_benign_reason_wins() {
        let err = CodedError::wrap(CodedError::new("inner").mark_benign_because("inner reason"))
            .mark_benign_because("outer reason");
        assert_eq!(is_benign(&err), Some("outer reason"));

        let err = CodedError::new("plain").mark_benign();
        assert_eq!(is_benign(&err), Some(""));
    }
}
