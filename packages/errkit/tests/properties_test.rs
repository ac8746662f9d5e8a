//! Property tests for chain lookups and conversion

use errkit::{
    code_of, convert, extract_auxiliary, has_any_code, has_code, Code, CodedError, Registry,
    RESERVED_CODES,
};
use proptest::prelude::*;
use std::io;

/// Wrap `root` in `depth` transparent structured layers
fn wrapped(root: CodedError, depth: usize) -> CodedError {
    (0..depth).fold(root, |err, _| CodedError::wrap(err))
}

fn arb_message() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?-]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_code_survives_any_wrapping_depth(code in 1u32..200, depth in 0usize..20) {
        let err = wrapped(CodedError::new("root").with_code(Code(code)), depth);
        prop_assert!(has_code(&err, Code(code)));
        prop_assert_eq!(code_of(&err), Code(code));
    }

    #[test]
    fn prop_outer_code_wins_regardless_of_candidate_order(
        outer in 100u32..150,
        inner in 150u32..200,
        depth in 0usize..5,
    ) {
        let inner_err = wrapped(CodedError::new("inner").with_code(Code(inner)), depth);
        let err = CodedError::wrap(inner_err).with_code(Code(outer));
        prop_assert_eq!(has_any_code(&err, &[Code(inner), Code(outer)]), Some(Code(outer)));
        prop_assert_eq!(has_any_code(&err, &[Code(outer), Code(inner)]), Some(Code(outer)));
    }

    #[test]
    fn prop_convert_is_idempotent(message in arb_message()) {
        let first = convert(io::Error::other(message.clone()));
        let second = convert(first.clone());
        prop_assert!(CodedError::ptr_eq(&first, &second));
        prop_assert_eq!(second.to_string(), message);
    }

    #[test]
    fn prop_auxiliary_outer_wins(key in "[a-z]{1,8}", outer in any::<i64>(), inner in any::<i64>()) {
        let inner_err = CodedError::new("inner").with_aux(key.clone(), inner);
        let err = CodedError::wrap(inner_err).with_aux(key.clone(), outer);
        let merged = extract_auxiliary(&err).unwrap_or_default();
        prop_assert_eq!(merged.get(&key).and_then(serde_json::Value::as_i64), Some(outer));
    }

    #[test]
    fn prop_reserved_codes_cannot_be_registered(code in 0u32..RESERVED_CODES) {
        let result = std::panic::catch_unwind(|| {
            let mut registry = Registry::new();
            registry.register_error_code(Code(code), "reserved");
        });
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_application_codes_can_be_registered(code in RESERVED_CODES..u32::MAX) {
        let mut registry = Registry::new();
        registry.register_error_code(Code(code), "application");
        prop_assert_eq!(registry.code_description(Code(code)), Some("application"));
    }
}
