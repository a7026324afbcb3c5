//! Single-threaded deferred callback queue driven by a manual clock.
//!
//! # Responsibility
//! - Schedule fire-and-forget completion callbacks for providers.
//! - Advance time explicitly so asynchrony is deterministic and testable.
//!
//! # Invariants
//! - Callbacks fire in due-time order; equal due times fire in scheduling order.
//! - A callback never runs while the queue is borrowed, so it may schedule or
//!   cancel other callbacks.
//! - The clock never moves backwards.

use log::trace;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::time::Duration;

/// Handle for one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl Display for TimerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct TimerState {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), Callback>,
    due_by_id: BTreeMap<u64, Duration>,
}

impl TimerState {
    fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, Callback)> {
        let (&(due, id), _) = self.queue.first_key_value()?;
        if due > deadline {
            return None;
        }
        let callback = self.queue.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);
        Some((TimerId(id), callback))
    }
}

/// Shared handle to one timer queue. Clones drive the same clock.
#[derive(Clone, Default)]
pub struct TimerQueue {
    state: Rc<RefCell<TimerState>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since queue creation.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.state.borrow().due_by_id.contains_key(&id.0)
    }

    /// Schedules `callback` to run `delay` after the current virtual time.
    pub fn schedule(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now.saturating_add(delay);
        state.queue.insert((due, id), Box::new(callback));
        state.due_by_id.insert(id, due);
        trace!(
            "event=timer_scheduled module=timer timer={} due_ms={}",
            TimerId(id),
            due.as_millis()
        );
        TimerId(id)
    }

    /// Cancels a pending callback. Returns `false` if it already fired.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(due) = state.due_by_id.remove(&id.0) else {
            return false;
        };
        state.queue.remove(&(due, id.0));
        trace!("event=timer_cancelled module=timer timer={id}");
        true
    }

    /// Moves the clock forward by `by`, firing every callback due on the way.
    ///
    /// Returns the number of callbacks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.now().saturating_add(by);
        let fired = self.fire_until(deadline);
        let mut state = self.state.borrow_mut();
        state.now = state.now.max(deadline);
        fired
    }

    /// Fires callbacks until the queue is empty, jumping the clock as needed.
    pub fn run_until_idle(&self) -> usize {
        self.fire_until(Duration::MAX)
    }

    fn fire_until(&self, deadline: Duration) -> usize {
        let mut fired = 0;
        loop {
            let next = self.state.borrow_mut().pop_due(deadline);
            let Some((id, callback)) = next else {
                break;
            };
            trace!("event=timer_fired module=timer timer={id}");
            callback();
            fired += 1;
        }
        fired
    }
}
