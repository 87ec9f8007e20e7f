//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use underbar_foundation::{Error, ErrorContext, ErrorKind, SemanticLimit, Type};

#[test]
fn type_mismatch_names_both_types() {
    let err = Error::type_mismatch(Type::Collection, Type::Int);
    assert_eq!(err.to_string(), "type mismatch: expected collection, got int");
}

#[test]
fn unsupported_key_names_type() {
    let err = Error::unsupported_key(Type::Map);
    assert!(matches!(err.kind, ErrorKind::UnsupportedKey(Type::Map)));
    assert!(err.to_string().contains("map"));
}

#[test]
fn limit_exceeded_reports_limit() {
    let err = Error::limit_exceeded(SemanticLimit::MaxFlattenDepth { limit: 8 });
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::MaxFlattenDepth { limit: 8 })
    ));
    assert!(err.to_string().contains('8'));
}

#[test]
fn callback_and_invalid_argument_carry_messages() {
    assert!(Error::callback("boom").to_string().contains("boom"));
    assert!(
        Error::invalid_argument("empty collection")
            .to_string()
            .contains("empty collection")
    );
}

#[test]
fn in_operation_nests_operations() {
    let err = Error::type_mismatch(Type::Vec, Type::Null)
        .with_context(ErrorContext::new().with_operation("flatten"))
        .in_operation("difference");

    assert_eq!(err.operation(), Some("difference"));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.stack, vec!["flatten".to_string()]);
}

#[test]
fn in_operation_without_context() {
    let err = Error::callback("x").in_operation("once");
    assert_eq!(err.operation(), Some("once"));
}

#[test]
fn context_display() {
    let ctx = ErrorContext::new().with_operation("zip").with_argument(1);
    assert_eq!(ctx.to_string(), "in zip (argument 1)");
}
