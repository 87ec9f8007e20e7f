//! Cooperative single-threaded timer queue.
//!
//! Nothing runs in the background. The host pumps the queue with
//! [`TimerQueue::run_due`] (fire whatever is due now) or
//! [`TimerQueue::run_until_idle`] (sleep on the clock until every timer has
//! fired). Timers fire in deadline order, ties broken by registration order,
//! and each registration fires at most once.
//!
//! The clock is pluggable: [`SystemClock`] reads the monotonic clock and
//! really sleeps, [`ManualClock`] only moves when told to, which makes
//! timing-dependent code testable without waiting.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

/// Furthest a deadline is placed when `now + after` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Source of the current time for a [`TimerQueue`].
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Blocks (or pretends to) until `deadline` has been reached.
    fn sleep_until(&self, deadline: Instant);
}

/// The monotonic system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

/// A clock that only advances when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to a [`TimerQueue`].
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at the moment of construction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(by));
    }

    /// Moves the clock to `elapsed` past its origin. Never moves backwards.
    pub fn set_elapsed(&self, elapsed: Duration) {
        if elapsed > self.elapsed.get() {
            self.elapsed.set(elapsed);
        }
    }

    /// Time elapsed since the clock was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        deadline_after(self.origin, self.elapsed.get())
    }

    fn sleep_until(&self, deadline: Instant) {
        self.set_elapsed(deadline.saturating_duration_since(self.origin));
    }
}

/// Handle to a scheduled timer, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

type Callback = Box<dyn FnOnce()>;

struct Inner {
    clock: Box<dyn Clock>,
    next_id: u64,
    pending: BTreeMap<(Instant, TimerId), Callback>,
    deadlines: HashMap<TimerId, Instant>,
}

/// A shared handle to a queue of one-shot timers.
///
/// Cloning the handle shares the queue. The queue is `!Send`; callbacks run
/// on whichever thread pumps it.
#[derive(Clone)]
pub struct TimerQueue {
    inner: Rc<RefCell<Inner>>,
}

impl TimerQueue {
    /// Creates a queue driven by the [`SystemClock`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates a queue driven by `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                clock: Box::new(clock),
                next_id: 0,
                pending: BTreeMap::new(),
                deadlines: HashMap::new(),
            })),
        }
    }

    /// Current time according to the queue's clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.inner.borrow().clock.now()
    }

    /// Registers `callback` to run once `after` has elapsed.
    ///
    /// A wait too long to represent as an [`Instant`] is clamped to a
    /// deadline about a century out.
    pub fn schedule(&self, after: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        let deadline = deadline_after(inner.clock.now(), after);
        inner.pending.insert((deadline, id), Box::new(callback));
        inner.deadlines.insert(id, deadline);
        trace!(%id, ?after, "timer scheduled");
        id
    }

    /// Cancels a timer that has not fired yet. Returns false if it already
    /// fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(deadline) = inner.deadlines.remove(&id) else {
            return false;
        };
        inner.pending.remove(&(deadline, id));
        trace!(%id, "timer cancelled");
        true
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner
            .borrow()
            .pending
            .first_key_value()
            .map(|(&(deadline, _), _)| deadline)
    }

    /// Fires every timer whose deadline has been reached, returning how many
    /// fired. Callbacks may schedule or cancel timers on this queue.
    pub fn run_due(&self) -> usize {
        let mut fired = 0;
        while let Some((id, callback)) = self.pop_due() {
            trace!(%id, "timer fired");
            callback();
            fired += 1;
        }
        fired
    }

    /// Fires timers, sleeping on the clock between deadlines, until none
    /// remain. Returns how many fired.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        loop {
            fired += self.run_due();
            let Some(deadline) = self.next_deadline() else {
                return fired;
            };
            self.inner.borrow().clock.sleep_until(deadline);
        }
    }

    // The borrow is released before the callback runs.
    fn pop_due(&self) -> Option<(TimerId, Callback)> {
        let mut inner = self.inner.borrow_mut();
        let now = inner.clock.now();
        let (&(deadline, id), _) = inner.pending.first_key_value()?;
        if deadline > now {
            return None;
        }
        inner.deadlines.remove(&id);
        let callback = inner.pending.remove(&(deadline, id))?;
        Some((id, callback))
    }
}

fn deadline_after(now: Instant, after: Duration) -> Instant {
    now.checked_add(after)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
