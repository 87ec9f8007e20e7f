//! A decorator that limits a function to one invocation per time window.
//!
//! A call that arrives while no window is open runs the function right away
//! and opens a window. Calls inside the open window do not run it; the
//! first of them arms a single trailing call for the end of the window,
//! which runs with the arguments of the most recent call and opens a new
//! window. Every call returns the latest result synchronously.
//!
//! The trailing call rides on a [`TimerQueue`], so it only happens when the
//! host pumps the queue.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use underbar_foundation::{Error, Result, Value};

use crate::timer::{TimerId, TimerQueue};

#[derive(Debug, Default)]
struct State {
    window_start: Option<Instant>,
    trailing: Option<TimerId>,
    trailing_args: Vec<Value>,
    result: Value,
    trailing_error: Option<Error>,
}

struct Shared<F> {
    func: RefCell<F>,
    window: Duration,
    timers: TimerQueue,
    state: RefCell<State>,
}

impl<F> Shared<F>
where
    F: FnMut(&[Value]) -> Result<Value>,
{
    fn window_open(&self, state: &State, now: Instant) -> bool {
        // A window whose end is unrepresentable never closes.
        state.window_start.is_some_and(|start| {
            start
                .checked_add(self.window)
                .is_none_or(|end| now < end)
        })
    }

    fn invoke(&self, args: &[Value]) -> Result<Value> {
        let result = {
            let mut func = self.func.borrow_mut();
            (*func)(args)?
        };
        self.state.borrow_mut().result = result.clone();
        Ok(result)
    }

    fn fire_trailing(&self) {
        let args = {
            let mut state = self.state.borrow_mut();
            state.trailing = None;
            state.window_start = Some(self.timers.now());
            std::mem::take(&mut state.trailing_args)
        };
        debug!(window = ?self.window, "trailing call opened window");
        if let Err(error) = self.invoke(&args) {
            warn!(%error, "trailing throttled call failed");
            self.state.borrow_mut().trailing_error = Some(error);
        }
    }
}

/// Wraps a function so that it runs at most once per window.
///
/// Dropping the wrapper cancels any armed trailing call.
pub struct Throttled<F> {
    shared: Rc<Shared<F>>,
}

/// Wraps `func` so it runs at most once per `window`, with trailing calls
/// scheduled on `timers`.
pub fn throttle<F>(func: F, window: Duration, timers: &TimerQueue) -> Throttled<F>
where
    F: FnMut(&[Value]) -> Result<Value> + 'static,
{
    Throttled {
        shared: Rc::new(Shared {
            func: RefCell::new(func),
            window,
            timers: timers.clone(),
            state: RefCell::new(State::default()),
        }),
    }
}

impl<F> Throttled<F>
where
    F: FnMut(&[Value]) -> Result<Value> + 'static,
{
    /// Invokes the function if no window is open, otherwise arms the
    /// trailing call. Returns the most recent result (`undefined` before
    /// the first success).
    ///
    /// Calling the wrapper from inside the wrapped function is not supported.
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error when it runs immediately.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        let shared = &self.shared;
        let now = shared.timers.now();
        let mut state = shared.state.borrow_mut();

        if !shared.window_open(&state, now) {
            if let Some(id) = state.trailing.take() {
                shared.timers.cancel(id);
            }
            state.window_start = Some(now);
            drop(state);
            debug!(window = ?shared.window, "leading call opened window");
            return shared.invoke(args);
        }

        state.trailing_args = args.to_vec();
        if let (None, Some(start)) = (state.trailing, state.window_start) {
            let remaining = shared
                .window
                .saturating_sub(now.saturating_duration_since(start));
            let weak: Weak<Shared<F>> = Rc::downgrade(shared);
            let id = shared.timers.schedule(remaining, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.fire_trailing();
                }
            });
            debug!(?remaining, "trailing call armed");
            state.trailing = Some(id);
        }
        Ok(state.result.clone())
    }

    /// Returns true while a trailing call is waiting for its window to end.
    #[must_use]
    pub fn is_trailing_armed(&self) -> bool {
        self.shared.state.borrow().trailing.is_some()
    }

    /// The most recent result, without calling anything.
    #[must_use]
    pub fn last_result(&self) -> Value {
        self.shared.state.borrow().result.clone()
    }

    /// Takes the error raised by the last failed trailing call, if any.
    pub fn take_trailing_error(&self) -> Option<Error> {
        self.shared.state.borrow_mut().trailing_error.take()
    }
}

impl<F> Drop for Throttled<F> {
    fn drop(&mut self) {
        if let Some(id) = self.shared.state.borrow_mut().trailing.take() {
            self.shared.timers.cancel(id);
        }
    }
}

impl<F> fmt::Debug for Throttled<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("window", &self.shared.window)
            .field("state", &self.shared.state.borrow())
            .finish_non_exhaustive()
    }
}
