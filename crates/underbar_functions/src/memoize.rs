//! A decorator that caches results by a single primitive argument.

use std::collections::HashMap;

use tracing::debug;
use underbar_foundation::{Error, ErrorContext, Limits, Result, Type, Value};

/// Wraps a one-argument function with a result cache keyed on the argument.
///
/// Keys use exact value identity, so `1`, `1.0` and `"1"` are distinct
/// entries. Errors are never cached.
#[derive(Debug)]
pub struct Memoized<F> {
    func: F,
    cache: HashMap<Value, Value>,
    capacity: Option<usize>,
}

/// Wraps `func` with an unbounded cache.
pub fn memoize<F>(func: F) -> Memoized<F>
where
    F: FnMut(&[Value]) -> Result<Value>,
{
    memoize_with(func, &Limits::default())
}

/// Wraps `func` with a cache capped at `limits.max_memo_entries`.
///
/// Once the cache is full, misses are still computed but no longer stored.
pub fn memoize_with<F>(func: F, limits: &Limits) -> Memoized<F>
where
    F: FnMut(&[Value]) -> Result<Value>,
{
    Memoized {
        func,
        cache: HashMap::new(),
        capacity: limits.max_memo_entries,
    }
}

impl<F> Memoized<F>
where
    F: FnMut(&[Value]) -> Result<Value>,
{
    /// Returns the cached result for the single argument, computing it on a
    /// miss. A call with no arguments is keyed on `undefined`.
    ///
    /// # Errors
    ///
    /// Returns an unsupported key error if the argument is not a primitive
    /// or if more than one argument is given (reported as a sequence key),
    /// or the wrapped function's error.
    pub fn call(&mut self, args: &[Value]) -> Result<Value> {
        let undefined = Value::Undefined;
        let key = match args {
            [] => &undefined,
            [key] if key.is_primitive() => key,
            [key] => {
                return Err(Error::unsupported_key(key.value_type())
                    .with_context(ErrorContext::new().with_operation("memoize").with_argument(0)));
            }
            [_, ..] => {
                return Err(Error::unsupported_key(Type::Vec)
                    .with_context(ErrorContext::new().with_operation("memoize").with_argument(1)));
            }
        };

        if let Some(hit) = self.cache.get(key) {
            return Ok(hit.clone());
        }

        let result = (self.func)(args)?;
        if self.capacity.is_none_or(|capacity| self.cache.len() < capacity) {
            self.cache.insert(key.clone(), result.clone());
        } else {
            debug!(entries = self.cache.len(), %key, "memo cache full, result not stored");
        }
        Ok(result)
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every cached result.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
