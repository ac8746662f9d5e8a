//! Construction macros and `Result` extensions

use errkit::{bail, coded, ensure, has_code, is_benign, is_silent, wrap, Code, CodedError, ResultExt};
use std::io;

fn parse_port(raw: &str) -> Result<u16, CodedError> {
    ensure!(!raw.is_empty(), Code::MISSING_PARAMETER, "port is missing");
    match raw.parse::<u16>() {
        Ok(0) => bail!(Code::INVALID_ARGUMENT, "port {} is not usable", 0),
        Ok(port) => Ok(port),
        Err(err) => Err(wrap!(err, "invalid port {raw:?}").with_code(Code::MALFORMED_REQUEST)),
    }
}

fn boxed_failure() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    bail!(Code::UNAVAILABLE, "backend offline");
}

#[test]
fn ensure_rejects_failed_conditions() {
    let err = parse_port("").expect_err("empty input");
    assert_eq!(err.code(), Code::MISSING_PARAMETER);
    assert_eq!(err.to_string(), "port is missing");
}

#[test]
fn bail_returns_early_with_a_code() {
    let err = parse_port("0").expect_err("port zero");
    assert_eq!(err.code(), Code::INVALID_ARGUMENT);
    assert_eq!(err.to_string(), "port 0 is not usable");
    assert_eq!(parse_port("8080").ok(), Some(8080));
}

#[test]
fn bail_converts_into_the_return_type() {
    let err = boxed_failure().expect_err("always fails");
    assert!(has_code(&*err, Code::UNAVAILABLE));
}

#[test]
fn wrap_macro_keeps_the_parent() {
    let err = parse_port("http").expect_err("not a number");
    assert_eq!(err.code(), Code::MALFORMED_REQUEST);
    assert!(err.to_string().starts_with("invalid port \"http\": "));
    assert!(err
        .parent()
        .is_some_and(|parent| parent.downcast_ref::<std::num::ParseIntError>().is_some()));

    let transparent = wrap!(io::Error::other("eof"));
    assert_eq!(transparent.to_string(), "eof");
}

#[test]
fn coded_macro_formats_inline_arguments() {
    let shard = 3;
    assert_eq!(coded!("shard {shard} offline").to_string(), "shard 3 offline");
}

#[test]
fn result_extensions_attach_structure() {
    let failed: Result<(), io::Error> = Err(io::Error::other("refused"));

    let err = failed.with_code(Code::UNAVAILABLE).expect_err("still an error");
    assert_eq!(err.code(), Code::UNAVAILABLE);
    assert_eq!(err.to_string(), "refused");

    let failed: Result<(), io::Error> = Err(io::Error::other("closed"));
    let err = failed.silenced().expect_err("still an error");
    assert!(is_silent(&err));

    let failed: Result<(), io::Error> = Err(io::Error::other("gone"));
    let err = failed
        .mark_benign_because("client left")
        .expect_err("still an error");
    assert_eq!(is_benign(&err), Some("client left"));
}

#[test]
fn result_extensions_reuse_structured_errors() {
    let original = CodedError::not_found("row");
    let failed: Result<(), CodedError> = Err(original.clone());
    let err = failed.silenced().expect_err("still an error");

    assert_eq!(err.code(), Code::NOT_FOUND);
    assert!(is_silent(&err));
    assert!(!is_silent(&original));

    let ok: Result<u8, io::Error> = Ok(7);
    assert_eq!(ok.wrap_err("unused").ok(), Some(7));
}
