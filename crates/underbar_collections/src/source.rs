//! The iteration primitive every combinator is built on.
//!
//! A collection value is classified once, on entry, as either an indexed
//! sequence or a keyed mapping. [`each`] and [`try_each`] then walk it
//! without re-inspecting the value per element.

use underbar_foundation::{Error, ErrorContext, LtMap, LtVec, Result, Type, Value};

/// Position of an element within the collection being traversed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Key<'a> {
    /// Index into a sequence.
    Index(usize),
    /// Key of a mapping entry.
    Name(&'a Value),
}

impl Key<'_> {
    /// Returns the position as a value (an integer index or the map key).
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Index(index) => Value::from(index),
            Self::Name(key) => key.clone(),
        }
    }

    /// Returns the sequence index, if this is one.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::Name(_) => None,
        }
    }
}

/// A collection resolved to one of its two traversal shapes.
#[derive(Clone, Copy, Debug)]
pub enum Source<'a> {
    /// Ordered sequence, visited by ascending index.
    Indexed(&'a LtVec<Value>),
    /// Mapping, visited in insertion order.
    Keyed(&'a LtMap<Value, Value>),
}

impl<'a> Source<'a> {
    /// Classifies a value as a traversable collection.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch for anything other than a sequence or
    /// mapping, including `null` and `undefined`.
    pub fn of(collection: &'a Value) -> Result<Self> {
        match collection {
            Value::Vec(items) => Ok(Self::Indexed(items)),
            Value::Map(entries) => Ok(Self::Keyed(entries)),
            other => Err(Error::type_mismatch(Type::Collection, other.value_type())
                .with_context(ErrorContext::new().with_operation("each"))),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Indexed(items) => items.len(),
            Self::Keyed(entries) => entries.len(),
        }
    }

    /// Returns true if there is nothing to visit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Requires a sequence, reporting `operation` on failure.
///
/// # Errors
///
/// Returns a type mismatch when `value` is not a sequence.
pub fn expect_sequence<'a>(value: &'a Value, operation: &'static str) -> Result<&'a LtVec<Value>> {
    value.as_vec().ok_or_else(|| {
        Error::type_mismatch(Type::Vec, value.value_type())
            .with_context(ErrorContext::new().with_operation(operation))
    })
}

/// Visits every element, stopping at the first error the iterator returns.
///
/// The iterator receives `(value, key, collection)`.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection, or the
/// first error produced by `iterator`.
pub fn try_each<F>(collection: &Value, mut iterator: F) -> Result<()>
where
    F: FnMut(&Value, Key<'_>, &Value) -> Result<()>,
{
    match Source::of(collection)? {
        Source::Indexed(items) => {
            for (index, item) in items.iter().enumerate() {
                iterator(item, Key::Index(index), collection)?;
            }
        }
        Source::Keyed(entries) => {
            for (key, value) in entries.iter() {
                iterator(value, Key::Name(key), collection)?;
            }
        }
    }
    Ok(())
}

/// Visits every element of a sequence in index order, or every entry of a
/// mapping in insertion order.
///
/// # Errors
///
/// Returns a type mismatch if `collection` is not a collection.
pub fn each<F>(collection: &Value, mut iterator: F) -> Result<()>
where
    F: FnMut(&Value, Key<'_>, &Value),
{
    try_each(collection, |value, key, coll| {
        iterator(value, key, coll);
        Ok(())
    })
}
