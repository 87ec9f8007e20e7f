//! Integration tests for Value types
//!
//! Tests truthiness, equality, hashing, display, and coerced keys.

use std::collections::HashSet;

use underbar_foundation::{LtVec, NativeFn, Result, Type, Value};

// =============================================================================
// Truthiness
// =============================================================================

#[test]
fn falsy_values() {
    for value in [
        Value::Undefined,
        Value::Null,
        Value::Bool(false),
        Value::Int(0),
        Value::Float(0.0),
        Value::Float(-0.0),
        Value::Float(f64::NAN),
        Value::from(""),
    ] {
        assert!(!value.is_truthy(), "{value:?} should be falsy");
    }
}

#[test]
fn empty_collections_are_truthy() {
    assert!(Value::seq(Vec::<i64>::new()).is_truthy());
    assert!(Value::map(Vec::<(&str, i64)>::new()).is_truthy());
    assert!(Value::from("0").is_truthy());
}

// =============================================================================
// Equality and Hashing
// =============================================================================

#[test]
fn int_and_float_are_distinct() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::Int(1), Value::from("1"));
}

#[test]
fn nan_equals_itself() {
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
}

#[test]
fn structural_equality_of_collections() {
    let a = Value::seq(vec![Value::Int(1), Value::map(vec![("k", "v")])]);
    let b = Value::seq(vec![Value::Int(1), Value::map(vec![("k", "v")])]);
    assert_eq!(a, b);
}

#[test]
fn values_usable_in_hash_sets() {
    let set: HashSet<Value> = [
        Value::Int(1),
        Value::Int(1),
        Value::Float(1.0),
        Value::from("1"),
        Value::Undefined,
        Value::Null,
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 5);
}

#[test]
fn numeric_ordering_crosses_int_and_float() {
    assert!(Value::Int(1) < Value::Float(1.5));
    assert!(Value::Float(2.5) > Value::Int(2));
    assert!(Value::from("apple") < Value::from("banana"));
    assert_eq!(Value::Int(1).partial_cmp(&Value::from("1")), None);
}

// =============================================================================
// Coerced Keys
// =============================================================================

#[test]
fn coerced_keys_match_property_names() {
    assert_eq!(Value::Int(1).coerced_key(), "1");
    assert_eq!(Value::Float(1.0).coerced_key(), "1");
    assert_eq!(Value::Float(-0.0).coerced_key(), "0");
    assert_eq!(Value::Float(1.5).coerced_key(), "1.5");
    assert_eq!(Value::Float(f64::NAN).coerced_key(), "NaN");
    assert_eq!(Value::Float(f64::NEG_INFINITY).coerced_key(), "-Infinity");
    assert_eq!(Value::Bool(true).coerced_key(), "true");
    assert_eq!(Value::Undefined.coerced_key(), "undefined");
    assert_eq!(Value::Null.coerced_key(), "null");
}

#[test]
fn coerced_keys_of_collections() {
    let seq = Value::seq(vec![Value::Int(1), Value::Null, Value::from("a")]);
    assert_eq!(seq.coerced_key(), "1,,a");
    assert_eq!(Value::map(vec![("a", 1)]).coerced_key(), "[object Object]");
}

// =============================================================================
// Accessors and Conversions
// =============================================================================

#[test]
fn field_lookup() {
    let record = Value::map(vec![("name", Value::from("moe")), ("age", Value::Int(40))]);
    assert_eq!(record.field("name"), Value::from("moe"));
    assert_eq!(record.field("missing"), Value::Undefined);
    assert_eq!(Value::Int(3).field("name"), Value::Undefined);
}

#[test]
fn conversions() {
    assert_eq!(Value::from(Some(3)), Value::Int(3));
    assert_eq!(Value::from(None::<i64>), Value::Undefined);
    assert_eq!(Value::from(vec![1, 2]), Value::seq(vec![1, 2]));
    assert_eq!(
        Value::from(LtVec::from(vec![Value::Int(1)])).value_type(),
        Type::Vec
    );
}

#[test]
fn display_renders_nested_values() {
    let value = Value::seq(vec![
        Value::Int(1),
        Value::Undefined,
        Value::seq(vec![Value::from("a")]),
    ]);
    assert_eq!(value.to_string(), "[1, undefined, [a]]");
}

fn answer(_: &[Value]) -> Result<Value> {
    Ok(Value::Int(42))
}

#[test]
fn native_functions() {
    let f = NativeFn::new("answer", answer);
    assert_eq!(f.call(&[]).unwrap(), Value::Int(42));

    let value = Value::from(f.clone());
    assert_eq!(value.value_type(), Type::Fn);
    assert!(value.is_truthy());
    assert_eq!(value.to_string(), "<fn answer>");
    assert_eq!(value, Value::Fn(f));
}
