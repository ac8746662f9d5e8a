//! Structured errors for Rust services
//!
//! `errkit` attaches a stable [`Code`], disposition flags (benign, silent,
//! retriable), auxiliary data, typed attributes and the creating call stack
//! to an error, while staying a plain [`std::error::Error`]:
//!
//! ```
//! use errkit::{Code, CodedError};
//!
//! let err = CodedError::not_found("user 42")
//!     .with_aux("user_id", 42)
//!     .mark_benign_because("stale link");
//! let err = CodedError::wrap_with(err, "loading profile");
//!
//! assert_eq!(err.to_string(), "loading profile: user 42");
//! assert!(errkit::has_code(&err, Code::NOT_FOUND));
//! assert_eq!(errkit::is_benign(&err), Some("stale link"));
//! ```
//!
//! Lookups walk the `source()` chain, so flags set deep inside survive any
//! wrapper that forwards `source()`. Foreign error types can take part by
//! implementing [`ErrorDetails`] and registering with
//! [`Registry::register_details`].

pub mod attributes;
pub mod chain;
pub mod config;
pub mod conversions;
pub mod details;
pub mod error;
pub mod registry;
pub mod report;
pub mod stack;
pub mod traverse;

pub use attributes::{AttrKey, AttrValue, Attribute};
pub use chain::{chain, Chain, ChainRoot, MAX_CHAIN_DEPTH};
pub use config::{ConfigError, ErrorSettings};
pub use conversions::{canceled, convert, deadline_exceeded};
pub use details::{probe, Auxiliary, DetailsProbe, ErrorDetails};
pub use error::{
    default_render, joined_renderer, reset_renderer, set_renderer, BoxError, CodedError,
    Renderer, ResultExt, SharedError,
};
pub use errkit_common::{Code, LoggingTransformer, BUILTIN_CODES, RESERVED_CODES};
pub use registry::{
    modify_registry, registry, reset_registry, set_registry, ErrorConversion, Registry,
};
pub use report::{disposition, report, Disposition};
pub use stack::{max_stack_frames, set_max_stack_frames, Call, DEFAULT_MAX_STACK_FRAMES};
pub use traverse::{
    as_coded, attribute, code_of, extract_auxiliary, get_attribute, has_any_code, has_code,
    is_benign, is_not_found, is_retriable, is_silent,
};
