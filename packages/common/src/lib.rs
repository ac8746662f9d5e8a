//! Common infrastructure shared by the errkit crates
//!
//! This crate provides:
//! - [`Code`], the integer error classification, and the built-in code table
//! - [`LoggingTransformer`], the `env_logger` bootstrap and log helpers

pub mod code;
pub mod logging;

pub use code::{Code, BUILTIN_CODES, RESERVED_CODES};
pub use logging::LoggingTransformer;
