//! Disposition-aware error reporting
//!
//! Maps the flags found in a chain to a log severity so callers can write
//! `report(&err)` at the edge of a request instead of re-deriving the rules.

use crate::chain::ChainRoot;
use crate::registry::registry;
use crate::traverse::{code_of, extract_auxiliary, is_benign, is_retriable, is_silent};
use errkit_common::LoggingTransformer;
use log::Level;

/// How an error should be treated when it reaches a reporting boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Not logged at all
    Silent,
    /// Expected failure, with the first reason given (possibly empty)
    Benign(String),
    /// Failure worth retrying
    Retriable,
    /// Anything else
    Failure,
}

impl Disposition {
    /// Severity used by [`report`]; `None` for silent errors
    #[must_use]
    pub fn level(&self) -> Option<Level> {
        match self {
            Self::Silent => None,
            Self::Benign(_) => Some(Level::Info),
            Self::Retriable => Some(Level::Warn),
            Self::Failure => Some(Level::Error),
        }
    }
}

/// Classify an error; `None` for an absent error
///
/// Silence takes precedence over benign-ness, which takes precedence over
/// retriability.
pub fn disposition<'a>(err: impl ChainRoot<'a>) -> Option<Disposition> {
    let root = err.chain_root()?;
    let disposition = if is_silent(root) {
        Disposition::Silent
    } else if let Some(reason) = is_benign(root) {
        Disposition::Benign(reason.to_string())
    } else if is_retriable(root) {
        Disposition::Retriable
    } else {
        Disposition::Failure
    };
    Some(disposition)
}

/// Log an error at the severity its disposition calls for
///
/// The entry carries the rendered chain, the first non-unknown code with its
/// registered description and the merged auxiliary data. Returns the
/// disposition that was applied.
pub fn report<'a>(err: impl ChainRoot<'a>) -> Option<Disposition> {
    let root = err.chain_root()?;
    let disposition = disposition(root)?;
    let Some(level) = disposition.level() else {
        return Some(disposition);
    };

    let code = code_of(root);
    let registry = registry();
    let description = registry.code_description(code).unwrap_or_default();

    let mut fields = Vec::new();
    match &disposition {
        Disposition::Benign(reason) if reason.is_empty() => fields.push("benign".to_string()),
        Disposition::Benign(reason) => fields.push(format!("benign: {reason}")),
        Disposition::Retriable => fields.push("retriable".to_string()),
        Disposition::Silent | Disposition::Failure => {}
    }
    if let Some(auxiliary) = extract_auxiliary(root).filter(|aux| !aux.is_empty()) {
        let auxiliary = serde_json::Value::Object(auxiliary.into_iter().collect());
        fields.push(format!("auxiliary: {auxiliary}"));
    }
    let detail = (!fields.is_empty()).then(|| fields.join(", "));

    LoggingTransformer::log_error_report(
        level,
        code,
        description,
        &root.to_string(),
        detail.as_deref(),
    );
    Some(disposition)
}
