//! Operations composed from the traversal combinators: sorting, zipping,
//! flattening, and set algebra over sequences.

use underbar_foundation::{
    Error, ErrorContext, Limits, LtVec, Result, SemanticLimit, Type, Value,
};

use crate::keyset::KeySet;
use crate::source::{each, expect_sequence};
use crate::traversal::{filter, map};

/// How [`sort_by`] derives a sort key from each element.
#[derive(Clone, Copy)]
pub enum Selector<'f> {
    /// Key computed by a caller-supplied function.
    Projection(&'f dyn Fn(&Value) -> Value),
    /// Key read from a named field of each element.
    Field(&'f str),
}

impl<'f> Selector<'f> {
    fn resolve(self) -> Box<dyn Fn(&Value) -> Value + 'f> {
        match self {
            Self::Projection(project) => Box::new(project),
            Self::Field(name) => Box::new(move |item: &Value| item.field(name)),
        }
    }
}

/// Missing keys order before everything; incomparable keys are ties.
fn sorts_before(candidate: &Value, lowest: &Value) -> bool {
    match (candidate.is_undefined(), lowest.is_undefined()) {
        (true, false) => true,
        (_, true) => false,
        (false, false) => candidate < lowest,
    }
}

/// Sorts a sequence in place, ascending by the key `selector` derives, and
/// returns it.
///
/// Each key is computed once. Elements whose key is `undefined` sort
/// first. The sort is a selection sort, so equal keys may be reordered.
///
/// # Errors
///
/// Returns a type mismatch if `sequence` is not a sequence.
pub fn sort_by<'a>(sequence: &'a mut Value, selector: Selector<'_>) -> Result<&'a Value> {
    let Value::Vec(items) = &mut *sequence else {
        return Err(Error::type_mismatch(Type::Vec, sequence.value_type())
            .with_context(ErrorContext::new().with_operation("sort_by")));
    };

    let project = selector.resolve();
    let keys = map(&Value::Vec(items.clone()), |item, _, _| project(item))?;
    let keys = keys.as_vec().cloned().unwrap_or_default();
    let mut keyed: Vec<(Value, Value)> = keys.into_iter().zip(items.iter().cloned()).collect();

    for left in 0..keyed.len().saturating_sub(1) {
        let mut lowest = left;
        for right in left + 1..keyed.len() {
            if sorts_before(&keyed[right].0, &keyed[lowest].0) {
                lowest = right;
            }
        }
        keyed.swap(left, lowest);
    }

    *items = keyed.into_iter().map(|(_, item)| item).collect();
    Ok(&*sequence)
}

/// Groups the elements at each index across several sequences.
///
/// The result is as long as the longest input; shorter inputs contribute
/// `undefined` past their end. Zipping nothing yields an empty sequence.
///
/// # Errors
///
/// Returns a type mismatch naming the first argument that is not a
/// sequence.
pub fn zip(sequences: &[Value]) -> Result<Value> {
    let mut columns = Vec::with_capacity(sequences.len());
    for (position, sequence) in sequences.iter().enumerate() {
        let column = expect_sequence(sequence, "zip").map_err(|err| {
            err.with_context(ErrorContext::new().with_operation("zip").with_argument(position))
        })?;
        columns.push(column);
    }

    let longest = columns.iter().map(|column| column.len()).max().unwrap_or(0);
    let rows = (0..longest)
        .map(|index| {
            Value::Vec(
                columns
                    .iter()
                    .map(|column| column.get(index).cloned().unwrap_or_default())
                    .collect(),
            )
        })
        .collect();
    Ok(Value::Vec(rows))
}

/// Flattens nested sequences depth-first, left to right, using default
/// [`Limits`].
///
/// # Errors
///
/// See [`flatten_with`].
pub fn flatten(nested: &Value) -> Result<Value> {
    flatten_with(nested, &Limits::default())
}

/// Flattens nested sequences depth-first, left to right.
///
/// Non-sequence elements pass through unchanged. An `undefined` or empty
/// input yields an empty sequence.
///
/// # Errors
///
/// Returns a type mismatch for any other non-sequence input, or a limit
/// error when nesting exceeds `limits.max_flatten_depth`.
pub fn flatten_with(nested: &Value, limits: &Limits) -> Result<Value> {
    let items = match nested {
        Value::Undefined => return Ok(Value::Vec(LtVec::new())),
        other => expect_sequence(other, "flatten")?,
    };

    let mut flat = Vec::new();
    let mut stack: Vec<(&LtVec<Value>, usize)> = vec![(items, 0)];
    while let Some(frame) = stack.last_mut() {
        let (current, position) = *frame;
        frame.1 += 1;
        match current.get(position) {
            None => {
                stack.pop();
            }
            Some(Value::Vec(inner)) => {
                if stack.len() >= limits.max_flatten_depth {
                    return Err(Error::limit_exceeded(SemanticLimit::MaxFlattenDepth {
                        limit: limits.max_flatten_depth,
                    })
                    .with_context(ErrorContext::new().with_operation("flatten")));
                }
                stack.push((inner, 0));
            }
            Some(item) => flat.push(item.clone()),
        }
    }
    Ok(Value::Vec(LtVec::from(flat)))
}

/// Returns the values present in every input sequence.
///
/// Values are identified by coerced key and each input counts a value at
/// most once, so duplicates within one sequence cannot stand in for an
/// occurrence elsewhere. The first occurrence of each surviving value is
/// returned, in key enumeration order. No inputs yield an empty sequence.
///
/// # Errors
///
/// Returns a type mismatch naming the first argument that is not a
/// sequence.
pub fn intersection(sequences: &[Value]) -> Result<Value> {
    let mut counts = KeySet::new();
    for (position, sequence) in sequences.iter().enumerate() {
        expect_sequence(sequence, "intersection").map_err(|err| {
            err.with_context(
                ErrorContext::new()
                    .with_operation("intersection")
                    .with_argument(position),
            )
        })?;

        let mut seen = KeySet::new();
        each(sequence, |item, _, _| {
            if seen.insert(item) {
                counts.increment(item);
            }
        })?;
    }

    let required = sequences.len();
    Ok(Value::Vec(LtVec::from(
        counts.into_values_where(|count| count == required),
    )))
}

/// Returns the elements of `sequence` that occur in none of `others`,
/// preserving order and multiplicity.
///
/// `others` are flattened before comparison and values are identified by
/// coerced key.
///
/// # Errors
///
/// Returns a type mismatch naming the first argument that is not a
/// sequence.
pub fn difference(sequence: &Value, others: &[Value]) -> Result<Value> {
    expect_sequence(sequence, "difference").map_err(|err| {
        err.with_context(
            ErrorContext::new()
                .with_operation("difference")
                .with_argument(0),
        )
    })?;
    for (position, other) in others.iter().enumerate() {
        expect_sequence(other, "difference").map_err(|err| {
            err.with_context(
                ErrorContext::new()
                    .with_operation("difference")
                    .with_argument(position + 1),
            )
        })?;
    }

    let mut excluded = KeySet::new();
    let flat =
        flatten(&Value::seq(others.to_vec())).map_err(|err| err.in_operation("difference"))?;
    each(&flat, |item, _, _| {
        excluded.insert(item);
    })?;
    filter(sequence, |item| !excluded.contains(item))
}
