//! Structured error value
//!
//! Provides the [`CodedError`] node and everything attached to it:
//! - Construction and wrapping with call-site capture
//! - Fluent builders for codes, flags, auxiliary data and attributes
//! - Pluggable `Display` rendering
//! - Macros and `Result` extensions for ergonomic construction

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod macros;
pub mod types;

pub use display::{default_render, joined_renderer, reset_renderer, set_renderer, Renderer};
pub use extensions::ResultExt;
pub use types::{BoxError, CodedError, SharedError};
