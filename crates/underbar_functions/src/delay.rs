//! Deferred one-shot calls.

use std::time::Duration;

use tracing::warn;
use underbar_foundation::{Result, Value};

use crate::timer::{TimerId, TimerQueue};

/// Schedules `func(args)` to run once `wait` has elapsed on `timers`.
///
/// The result is discarded. An error is logged at `warn` level. The returned
/// id can be passed to [`TimerQueue::cancel`].
pub fn delay<F>(func: F, wait: Duration, args: Vec<Value>, timers: &TimerQueue) -> TimerId
where
    F: FnOnce(&[Value]) -> Result<Value> + 'static,
{
    timers.schedule(wait, move || {
        if let Err(error) = func(&args) {
            warn!(%error, "delayed call failed");
        }
    })
}
