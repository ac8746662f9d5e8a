//! Call-site capture and lazy stack traces
//! The frame limit is process-wide, so every test that resolves a trace holds
//! the guard below

use errkit::{
    convert, max_stack_frames, set_max_stack_frames, Call, Code, CodedError, ResultExt,
};
use std::io;
use std::sync::{Mutex, MutexGuard};

static FRAME_LIMIT: Mutex<()> = Mutex::new(());

fn exclusive() -> MutexGuard<'static, ()> {
    FRAME_LIMIT.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[inline(never)]
fn first() -> CodedError {
    second()
}

#[inline(never)]
fn second() -> CodedError {
    third()
}

#[inline(never)]
fn third() -> CodedError {
    CodedError::new("deep")
}

#[inline(never)]
fn failing_read() -> Result<(), io::Error> {
    Err(io::Error::other("eof"))
}

#[inline(never)]
fn caller_of_new() -> CodedError {
    CodedError::new("fresh")
}

#[inline(never)]
fn caller_of_wrap_with() -> CodedError {
    CodedError::wrap_with(io::Error::other("eof"), "reading body")
}

#[inline(never)]
fn caller_of_wrap_err() -> CodedError {
    match failing_read().wrap_err("reading header") {
        Ok(()) => CodedError::new("unexpected success"),
        Err(err) => err,
    }
}

#[inline(never)]
fn caller_of_with_code() -> CodedError {
    match failing_read().with_code(Code::UNAVAILABLE) {
        Ok(()) => CodedError::new("unexpected success"),
        Err(err) => err,
    }
}

#[inline(never)]
fn caller_of_convert() -> CodedError {
    convert(io::Error::other("reset"))
}

fn position(trace: &[Call], name: &str) -> Option<usize> {
    trace
        .iter()
        .position(|call| call.function.ends_with(name))
}

/// Whether the trace is the origin-only fallback used when no symbols exist
fn unsymbolized(err: &CodedError, trace: &[Call]) -> bool {
    if trace.iter().all(|call| call.function.is_empty()) {
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].line, err.location().line());
        return true;
    }
    false
}

fn assert_trace_starts_at(err: &CodedError, caller: &str) {
    let trace = err.stack_trace();
    assert!(!trace.is_empty());
    if unsymbolized(err, trace) {
        return;
    }
    assert!(
        trace[0].function.ends_with(caller),
        "trace for {caller} starts at {:?}",
        trace[0].function
    );
}

#[test]
fn location_is_the_constructor_call_site() {
    let (err, line) = (CodedError::new("here"), line!());
    assert_eq!(err.location().line(), line);
    assert!(err.location().file().ends_with("stack_trace_test.rs"));
}

#[test]
fn wrappers_record_their_own_call_site() {
    let inner = third();
    let (outer, line) = (CodedError::wrap_with(inner.clone(), "outer"), line!());
    assert_eq!(outer.location().line(), line);
    assert_ne!(inner.location().line(), line);
}

#[test]
fn result_extensions_record_the_caller() {
    let (result, line) = (failing_read().wrap_err("reading header"), line!());
    let err = result.expect_err("read always fails");
    assert_eq!(err.location().line(), line);
    assert_eq!(err.to_string(), "reading header: eof");
}

#[test]
fn trace_starts_at_the_innermost_caller() {
    let _guard = exclusive();
    let err = first();
    assert_trace_starts_at(&err, "third");

    let trace = err.stack_trace();
    if unsymbolized(&err, trace) {
        return;
    }
    if let Some(second_at) = position(trace, "second") {
        assert!(second_at > 0);
    }
}

#[test]
fn constructors_start_their_trace_at_the_caller() {
    let _guard = exclusive();
    assert_trace_starts_at(&caller_of_new(), "caller_of_new");
    assert_trace_starts_at(&caller_of_wrap_with(), "caller_of_wrap_with");
}

#[test]
fn result_extensions_start_their_trace_at_the_caller() {
    let _guard = exclusive();
    assert_trace_starts_at(&caller_of_wrap_err(), "caller_of_wrap_err");
    assert_trace_starts_at(&caller_of_with_code(), "caller_of_with_code");
}

#[test]
fn conversions_start_their_trace_at_the_caller() {
    let _guard = exclusive();
    assert_trace_starts_at(&caller_of_convert(), "caller_of_convert");
}

#[test]
fn trace_is_resolved_once_and_shared_by_clones() {
    let _guard = exclusive();
    let err = first();
    let clone = err.clone();
    let trace = err.stack_trace();
    assert!(std::ptr::eq(trace, clone.stack_trace()));
}

#[test]
fn trace_respects_the_frame_limit() {
    let _guard = exclusive();
    let previous = max_stack_frames();
    set_max_stack_frames(1);
    let err = first();
    assert_eq!(err.stack_trace().len(), 1);
    set_max_stack_frames(previous);
}
