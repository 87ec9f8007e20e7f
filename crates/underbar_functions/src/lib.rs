//! Stateful function decorators for Underbar.
//!
//! This crate provides:
//! - [`once`] - Run a function at most once, replaying its result
//! - [`memoize`] - Cache results by a single primitive argument
//! - [`throttle`] - Run a function at most once per time window
//! - [`delay`] - Schedule a one-shot call
//! - [`TimerQueue`] - The cooperative timer facility behind `throttle` and `delay`
//!
//! Decorated functions take `&[Value]` and return `Result<Value>`. Wrappers
//! own their state and are meant for a single caller on a single thread.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod delay;
pub mod memoize;
pub mod once;
pub mod throttle;
pub mod timer;

pub use delay::delay;
pub use memoize::{Memoized, memoize, memoize_with};
pub use once::{Once, once};
pub use throttle::{Throttled, throttle};
pub use timer::{Clock, ManualClock, SystemClock, TimerId, TimerQueue};
