//! Swapping the process-wide renderer
//! Kept to a single test: the renderer is shared by everything in this binary

use errkit::{joined_renderer, reset_renderer, set_renderer, CodedError};
use std::io;

#[test]
fn renderer_can_be_replaced_and_restored() {
    let err = CodedError::wrap_with(CodedError::wrap_with(io::Error::other("eof"), "decode"), "load");
    assert_eq!(err.to_string(), "load: decode: eof");

    set_renderer(joined_renderer(" <- "));
    assert_eq!(err.to_string(), "load <- decode <- eof");

    set_renderer(|err: &CodedError, f: &mut std::fmt::Formatter<'_>| {
        write!(f, "[{}] {}", err.code(), err.message())
    });
    assert_eq!(err.to_string(), "[0] load");

    reset_renderer();
    assert_eq!(err.to_string(), "load: decode: eof");
}
