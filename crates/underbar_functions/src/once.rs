//! A decorator that runs its function at most once.

use underbar_foundation::{Result, Value};

#[derive(Clone, Debug, Default)]
enum State {
    #[default]
    Unfired,
    Fired(Value),
}

/// Wraps a function so that only its first successful call runs.
///
/// Later calls return the stored result without invoking the function. If
/// the first call fails, the error is returned and the wrapper stays
/// unfired, so the next call tries again.
#[derive(Clone, Debug)]
pub struct Once<F> {
    func: F,
    state: State,
}

/// Wraps `func` in a [`Once`].
pub fn once<F>(func: F) -> Once<F>
where
    F: FnMut(&[Value]) -> Result<Value>,
{
    Once {
        func,
        state: State::Unfired,
    }
}

impl<F> Once<F>
where
    F: FnMut(&[Value]) -> Result<Value>,
{
    /// Calls the wrapped function the first time; returns its result on
    /// every later call.
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error while it has not yet succeeded.
    pub fn call(&mut self, args: &[Value]) -> Result<Value> {
        if let State::Fired(result) = &self.state {
            return Ok(result.clone());
        }
        let result = (self.func)(args)?;
        self.state = State::Fired(result.clone());
        Ok(result)
    }

    /// Returns true once the wrapped function has succeeded.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        matches!(self.state, State::Fired(_))
    }
}
