//! Combinators derived from [`each`](crate::each) and [`reduce`].
//!
//! None of these re-implement iteration: `map`, `filter`, `uniq`, and
//! `index_of` drive [`try_each`]; `contains` and `every` fold with
//! [`reduce`]; `reject` and `some` are expressed through `filter` and
//! `every`.

use underbar_foundation::{Error, ErrorContext, LtVec, Result, Type, Value};

use crate::keyset::KeySet;
use crate::source::{Key, each, expect_sequence, try_each};

/// Coercion of callback results to a boolean.
pub trait Truthy {
    /// Returns whether the value counts as true.
    fn truthy(&self) -> bool;
}

impl Truthy for bool {
    fn truthy(&self) -> bool {
        *self
    }
}

impl Truthy for Value {
    fn truthy(&self) -> bool {
        self.is_truthy()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::truthy)
    }
}

/// Returns its argument.
///
/// This is the default predicate for [`every_truthy`] and [`some_truthy`].
#[must_use]
pub fn identity(value: &Value) -> Value {
    value.clone()
}

/// Returns the position of the first element equal to `target`, or `None`.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn index_of(sequence: &Value, target: &Value) -> Result<Option<usize>> {
    expect_sequence(sequence, "index_of")?;
    let mut found = None;
    each(sequence, |item, key, _| {
        if found.is_none() && item == target {
            found = key.index();
        }
    })?;
    Ok(found)
}

/// Applies a fallible iterator to every element, collecting the results.
///
/// # Errors
///
/// Returns a type mismatch for non-collections, or the first error the
/// iterator raises.
pub fn try_map<F>(collection: &Value, mut iterator: F) -> Result<Value>
where
    F: FnMut(&Value, Key<'_>, &Value) -> Result<Value>,
{
    let mut results = Vec::new();
    try_each(collection, |value, key, coll| {
        results.push(iterator(value, key, coll)?);
        Ok(())
    })?;
    Ok(Value::Vec(LtVec::from(results)))
}

/// Produces a new sequence holding `iterator(value, key, collection)` for
/// every element, in traversal order.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn map<F>(collection: &Value, mut iterator: F) -> Result<Value>
where
    F: FnMut(&Value, Key<'_>, &Value) -> Value,
{
    try_map(collection, |value, key, coll| Ok(iterator(value, key, coll)))
}

/// Keeps the elements for which `predicate` is truthy, in original order.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn filter<F, R>(collection: &Value, mut predicate: F) -> Result<Value>
where
    F: FnMut(&Value) -> R,
    R: Truthy,
{
    let mut kept = Vec::new();
    each(collection, |value, _, _| {
        if predicate(value).truthy() {
            kept.push(value.clone());
        }
    })?;
    Ok(Value::Vec(LtVec::from(kept)))
}

/// Keeps the elements for which `predicate` is falsy, in original order.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn reject<F, R>(collection: &Value, mut predicate: F) -> Result<Value>
where
    F: FnMut(&Value) -> R,
    R: Truthy,
{
    filter(collection, |value| !predicate(value).truthy())
}

/// Returns each distinct element once.
///
/// Elements are identified by their coerced key, so `1` and `"1"` count as
/// the same element and the first one seen is kept. Output follows key
/// enumeration order rather than insertion order: integer-like elements
/// come first in ascending order, e.g. `uniq(["b", 2, 1])` is `[1, 2, "b"]`.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn uniq(sequence: &Value) -> Result<Value> {
    expect_sequence(sequence, "uniq")?;
    let mut seen = KeySet::new();
    each(sequence, |value, _, _| {
        seen.insert(value);
    })?;
    Ok(Value::Vec(LtVec::from(seen.into_values())))
}

/// Folds a collection with a fallible iterator.
///
/// With `initial` absent, the first element seeds the accumulator and
/// folding starts at the second.
///
/// # Errors
///
/// Returns an invalid argument error when the collection is empty and no
/// initial value is given, a type mismatch for non-collections, or the
/// first error the iterator raises.
pub fn try_reduce<F>(collection: &Value, mut iterator: F, initial: Option<Value>) -> Result<Value>
where
    F: FnMut(Value, &Value) -> Result<Value>,
{
    let mut accumulator = initial;
    try_each(collection, |value, _, _| {
        accumulator = Some(match accumulator.take() {
            Some(acc) => iterator(acc, value)?,
            None => value.clone(),
        });
        Ok(())
    })
    .map_err(|err| err.in_operation("reduce"))?;
    accumulator.ok_or_else(|| {
        Error::invalid_argument("empty collection with no initial value")
            .with_context(ErrorContext::new().with_operation("reduce"))
    })
}

/// Folds a collection into a single value via
/// `accumulator = iterator(accumulator, element)`.
///
/// # Errors
///
/// Returns an invalid argument error when the collection is empty and no
/// initial value is given, or a type mismatch for non-collections.
pub fn reduce<F>(collection: &Value, mut iterator: F, initial: Option<Value>) -> Result<Value>
where
    F: FnMut(Value, &Value) -> Value,
{
    try_reduce(collection, |acc, value| Ok(iterator(acc, value)), initial)
}

/// Returns true if any element equals `target`.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn contains(collection: &Value, target: &Value) -> Result<bool> {
    let found = reduce(
        collection,
        |was_found, item| Value::Bool(was_found.is_truthy() || item == target),
        Some(Value::Bool(false)),
    )
    .map_err(|err| err.in_operation("contains"))?;
    Ok(found.is_truthy())
}

/// Returns true if `predicate` holds for every element (vacuously true when
/// empty). The predicate is not consulted again after the first failure.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn every<F, R>(collection: &Value, mut predicate: F) -> Result<bool>
where
    F: FnMut(&Value) -> R,
    R: Truthy,
{
    let all = reduce(
        collection,
        |passed, item| {
            if !passed.is_truthy() {
                return passed;
            }
            Value::Bool(predicate(item).truthy())
        },
        Some(Value::Bool(true)),
    )
    .map_err(|err| err.in_operation("every"))?;
    Ok(all.is_truthy())
}

/// Returns true if every element is truthy.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn every_truthy(collection: &Value) -> Result<bool> {
    every(collection, identity)
}

/// Returns true if `predicate` holds for at least one element.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn some<F, R>(collection: &Value, mut predicate: F) -> Result<bool>
where
    F: FnMut(&Value) -> R,
    R: Truthy,
{
    let all_fail = every(collection, |item| !predicate(item).truthy())
        .map_err(|err| err.in_operation("some"))?;
    Ok(!all_fail)
}

/// Returns true if any element is truthy.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn some_truthy(collection: &Value) -> Result<bool> {
    some(collection, identity)
}

/// Returns the first element, or `undefined` when empty.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn first(sequence: &Value) -> Result<Value> {
    let items = expect_sequence(sequence, "first")?;
    Ok(items.first().cloned().unwrap_or_default())
}

/// Returns the first `n` elements.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn first_n(sequence: &Value, n: usize) -> Result<Value> {
    let items = expect_sequence(sequence, "first")?;
    Ok(Value::Vec(items.iter().take(n).cloned().collect()))
}

/// Returns the last element, or `undefined` when empty.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn last(sequence: &Value) -> Result<Value> {
    let items = expect_sequence(sequence, "last")?;
    Ok(items.last().cloned().unwrap_or_default())
}

/// Returns the last `n` elements.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn last_n(sequence: &Value, n: usize) -> Result<Value> {
    let items = expect_sequence(sequence, "last")?;
    let skip = items.len().saturating_sub(n);
    Ok(Value::Vec(items.iter().skip(skip).cloned().collect()))
}

/// Projects the named field out of every element.
///
/// Elements that are not mappings, or lack the field, yield `undefined`.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn pluck(collection: &Value, field: &str) -> Result<Value> {
    map(collection, |value, _, _| value.field(field))
}

/// What [`invoke`] calls on each element.
#[derive(Clone, Copy)]
pub enum Invocation<'f> {
    /// A method supplied by the caller, given `(receiver, args)`.
    Method(&'f dyn Fn(&Value, &[Value]) -> Result<Value>),
    /// The native function stored under this field of each element.
    Named(&'f str),
}

impl<'f> Invocation<'f> {
    fn resolve(self) -> Box<dyn Fn(&Value, &[Value]) -> Result<Value> + 'f> {
        match self {
            Self::Method(method) => Box::new(method),
            Self::Named(name) => Box::new(move |receiver: &Value, args: &[Value]| {
                let field = receiver.field(name);
                let Some(function) = field.as_fn() else {
                    return Err(Error::type_mismatch(Type::Fn, field.value_type())
                        .with_context(ErrorContext::new().with_operation("invoke").with_frame(name)));
                };
                let mut call_args = Vec::with_capacity(args.len() + 1);
                call_args.push(receiver.clone());
                call_args.extend_from_slice(args);
                function.call(&call_args)
            }),
        }
    }
}

/// Calls a method on every element and collects the results.
///
/// # Errors
///
/// Returns a type mismatch for non-collections or elements without the
/// named function, or the first error a call raises.
pub fn invoke(collection: &Value, invocation: Invocation<'_>, args: &[Value]) -> Result<Value> {
    let call = invocation.resolve();
    try_map(collection, |value, _, _| call(value, args))
}
