//! Integration tests for composite operations
//!
//! Tests sorting, zipping, flattening, and the set operations.

use proptest::prelude::*;
use underbar_collections::{
    Selector, difference, flatten, flatten_with, intersection, shuffle, shuffle_seeded, sort_by,
    zip,
};
use underbar_foundation::{ErrorKind, Limits, SemanticLimit, Value};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ints(values: &[i64]) -> Value {
    Value::seq(values.to_vec())
}

fn sorted_ints(value: &Value) -> Vec<i64> {
    let mut out: Vec<i64> = value
        .as_vec()
        .expect("sequence")
        .iter()
        .map(|item| item.as_int().expect("int"))
        .collect();
    out.sort_unstable();
    out
}

// =============================================================================
// sort_by
// =============================================================================

#[test]
fn sort_by_field_ascending() {
    let mut people = Value::seq(vec![
        Value::map(vec![("name", Value::from("curly")), ("age", Value::Int(60))]),
        Value::map(vec![("name", Value::from("moe")), ("age", Value::Int(40))]),
        Value::map(vec![("name", Value::from("larry")), ("age", Value::Int(50))]),
    ]);
    let sorted = sort_by(&mut people, Selector::Field("age")).unwrap().clone();

    let names: Vec<Value> = sorted
        .as_vec()
        .unwrap()
        .iter()
        .map(|person| person.field("name"))
        .collect();
    assert_eq!(names, vec![Value::from("moe"), Value::from("larry"), Value::from("curly")]);
    assert_eq!(people, sorted);
}

#[test]
fn sort_by_projection() {
    let mut words = Value::seq(vec!["banana", "kiwi", "apple"]);
    let length = |word: &Value| Value::from(word.as_str().map_or(0, str::len));
    sort_by(&mut words, Selector::Projection(&length)).unwrap();
    assert_eq!(words, Value::seq(vec!["kiwi", "apple", "banana"]));
}

#[test]
fn sort_by_puts_missing_keys_first() {
    let mut rows = Value::seq(vec![
        Value::map(vec![("rank", 2)]),
        Value::map(vec![("other", 1)]),
        Value::map(vec![("rank", 1)]),
    ]);
    sort_by(&mut rows, Selector::Field("rank")).unwrap();

    let ranks: Vec<Value> = rows
        .as_vec()
        .unwrap()
        .iter()
        .map(|row| row.field("rank"))
        .collect();
    assert_eq!(ranks, vec![Value::Undefined, Value::Int(1), Value::Int(2)]);
}

#[test]
fn sort_by_rejects_mappings() {
    let mut record = Value::map(vec![("a", 1)]);
    let err = sort_by(&mut record, Selector::Field("a")).unwrap_err();
    assert_eq!(err.operation(), Some("sort_by"));
}

// =============================================================================
// zip
// =============================================================================

#[test]
fn zip_pads_with_undefined() {
    let zipped = zip(&[Value::seq(vec!["a", "b", "c"]), ints(&[1, 2])]).unwrap();
    assert_eq!(
        zipped,
        Value::seq(vec![
            Value::seq(vec![Value::from("a"), Value::Int(1)]),
            Value::seq(vec![Value::from("b"), Value::Int(2)]),
            Value::seq(vec![Value::from("c"), Value::Undefined]),
        ])
    );
}

#[test]
fn zip_of_nothing_is_empty() {
    assert_eq!(zip(&[]).unwrap(), ints(&[]));
}

#[test]
fn zip_reports_bad_argument_position() {
    let err = zip(&[ints(&[1]), Value::Null]).unwrap_err();
    let ctx = err.context.unwrap();
    assert_eq!(ctx.operation, Some("zip"));
    assert_eq!(ctx.argument, Some(1));
}

// =============================================================================
// flatten
// =============================================================================

#[test]
fn flatten_nested_sequences() {
    let nested = Value::seq(vec![
        Value::Int(1),
        ints(&[2]),
        Value::seq(vec![Value::Int(3), Value::seq(vec![ints(&[4])])]),
    ]);
    assert_eq!(flatten(&nested).unwrap(), ints(&[1, 2, 3, 4]));
}

#[test]
fn flatten_keeps_mappings_whole() {
    let record = Value::map(vec![("a", 1)]);
    let nested = Value::seq(vec![record.clone(), ints(&[])]);
    assert_eq!(flatten(&nested).unwrap(), Value::seq(vec![record]));
}

#[test]
fn flatten_missing_and_null() {
    assert_eq!(flatten(&Value::Undefined).unwrap(), ints(&[]));
    let err = flatten(&Value::Null).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn flatten_depth_is_limited() {
    let mut nested = ints(&[1]);
    for _ in 0..10 {
        nested = Value::seq(vec![nested]);
    }

    let limits = Limits::default().with_max_flatten_depth(5);
    let err = flatten_with(&nested, &limits).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::MaxFlattenDepth { limit: 5 })
    ));
    assert_eq!(flatten(&nested).unwrap(), ints(&[1]));
}

// =============================================================================
// intersection / difference
// =============================================================================

#[test]
fn intersection_of_two() {
    let common = intersection(&[ints(&[1, 2, 3]), ints(&[2, 3, 4])]).unwrap();
    assert_eq!(sorted_ints(&common), vec![2, 3]);
}

#[test]
fn intersection_ignores_duplicates_within_one_input() {
    let common = intersection(&[ints(&[1, 1]), ints(&[2]), ints(&[])]).unwrap();
    assert_eq!(common, ints(&[]));

    let common = intersection(&[ints(&[5, 5]), ints(&[5])]).unwrap();
    assert_eq!(common, ints(&[5]));
}

#[test]
fn intersection_of_three_and_of_none() {
    let common = intersection(&[ints(&[1, 2, 3, 4]), ints(&[2, 4, 6]), ints(&[4, 2])]).unwrap();
    assert_eq!(sorted_ints(&common), vec![2, 4]);
    assert_eq!(intersection(&[]).unwrap(), ints(&[]));
}

#[test]
fn difference_preserves_order_and_multiplicity() {
    assert_eq!(
        difference(&ints(&[1, 2, 3, 4]), &[ints(&[2, 4])]).unwrap(),
        ints(&[1, 3])
    );
    assert_eq!(
        difference(&ints(&[3, 1, 3, 2]), &[ints(&[2]), ints(&[9])]).unwrap(),
        ints(&[3, 1, 3])
    );
    assert_eq!(difference(&ints(&[1, 2]), &[]).unwrap(), ints(&[1, 2]));
}

#[test]
fn difference_matches_by_coerced_key() {
    let result = difference(
        &Value::seq(vec![Value::Int(1), Value::from("2"), Value::Int(3)]),
        &[Value::seq(vec![Value::from("1"), Value::Int(2)])],
    )
    .unwrap();
    assert_eq!(result, ints(&[3]));
}

#[test]
fn difference_reports_flatten_limit_under_its_own_name() {
    let mut deep = Value::Int(1);
    for _ in 0..Limits::default().max_flatten_depth + 1 {
        deep = Value::seq(vec![deep]);
    }
    let err = difference(&ints(&[1]), &[deep]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
    assert_eq!(err.operation(), Some("difference"));
    assert_eq!(err.context.unwrap().stack, vec!["flatten".to_string()]);
}

#[test]
fn difference_reports_bad_argument_position() {
    let err = difference(&ints(&[1]), &[ints(&[]), Value::from("x")]).unwrap_err();
    assert_eq!(err.context.unwrap().argument, Some(2));
}

// =============================================================================
// shuffle
// =============================================================================

#[test]
fn shuffle_with_caller_rng_is_deterministic() {
    let input = ints(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let mut first = ChaCha8Rng::seed_from_u64(99);
    let mut second = ChaCha8Rng::seed_from_u64(99);
    assert_eq!(
        shuffle(&input, &mut first).unwrap(),
        shuffle(&input, &mut second).unwrap()
    );
    assert_eq!(shuffle_seeded(&input, 99).unwrap(), shuffle(&input, &mut ChaCha8Rng::seed_from_u64(99)).unwrap());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn zip_length_is_longest_input(a in prop::collection::vec(any::<i64>(), 0..10), b in prop::collection::vec(any::<i64>(), 0..10)) {
        let zipped = zip(&[Value::seq(a.clone()), Value::seq(b.clone())]).unwrap();
        prop_assert_eq!(zipped.as_vec().unwrap().len(), a.len().max(b.len()));
    }

    #[test]
    fn difference_excludes_every_other_value(a in prop::collection::vec(0i64..20, 0..30), b in prop::collection::vec(0i64..20, 0..30)) {
        let result = difference(&Value::seq(a.clone()), &[Value::seq(b.clone())]).unwrap();
        let expected: Vec<i64> = a.into_iter().filter(|n| !b.contains(n)).collect();
        prop_assert_eq!(result, Value::seq(expected));
    }

    #[test]
    fn intersection_is_subset_of_each_input(a in prop::collection::vec(0i64..15, 0..20), b in prop::collection::vec(0i64..15, 0..20)) {
        let common = intersection(&[Value::seq(a.clone()), Value::seq(b.clone())]).unwrap();
        let values = sorted_ints(&common);
        let mut expected: Vec<i64> = a.iter().copied().filter(|n| b.contains(n)).collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(values, expected);
    }
}
