//! Delayed callbacks
//!
//! The banner auto-hide is the only timed behaviour on the page. Hosts supply a
//! [`Scheduler`]; tests and headless embedders use [`ManualScheduler`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One-shot delayed callbacks on the host's event loop
pub trait Scheduler {
    type Handle: Clone + fmt::Debug + 'static;

    /// Returns `None` when the host refused to schedule the task
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    /// Cancelling a fired or unknown handle does nothing
    fn cancel(&self, handle: &Self::Handle);
}

/// What happens to a pending banner hide when another submission is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerTimerPolicy {
    /// Cancel the pending hide and start a fresh one
    #[default]
    Restart,
    /// Leave earlier hides running; the first one to fire hides the banner
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct PendingTask {
    id: TimerId,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    tasks: Vec<PendingTask>,
}

/// Simulated clock. Time only moves when [`ManualScheduler::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().tasks.len()
    }

    /// Move time forward, running every task that falls due, in due order.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                // Ties run in scheduling order, ids increase monotonically
                let index = clock
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);

                index.map(|i| {
                    let task = clock.tasks.remove(i);
                    clock.now = task.due;
                    task
                })
            };

            // Run outside the borrow so the task may schedule more work
            match next {
                Some(pending) => {
                    (pending.task)();
                    fired += 1;
                }
                None => break,
            }
        }

        self.clock.borrow_mut().now = target;
        fired
    }

    pub fn advance_ms(&self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TimerId> {
        let mut clock = self.clock.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.tasks.push(PendingTask { id, due, task });
        Some(id)
    }

    fn cancel(&self, handle: &TimerId) {
        self.clock.borrow_mut().tasks.retain(|t| t.id != *handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let count = Rc::new(Cell::new(0));
        let shared = Rc::clone(&count);
        let make = move || {
            let c = Rc::clone(&shared);
            Box::new(move || c.set(c.get() + 1)) as Box<dyn FnOnce()>
        };
        (count, make)
    }

    #[test]
    fn test_task_runs_only_when_due() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        scheduler.schedule(Duration::from_millis(5000), task());

        assert_eq!(scheduler.advance_ms(4999), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.advance_ms(1), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(5000));
    }

    #[test]
    fn test_cancel_prevents_run() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        let handle = scheduler.schedule(Duration::from_millis(10), task()).unwrap();
        scheduler.cancel(&handle);
        // second cancel is harmless
        scheduler.cancel(&handle);

        assert_eq!(scheduler.advance_ms(100), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (label, ms) in [("late", 30u64), ("early", 10), ("mid", 20), ("mid2", 20)] {
            let order = Rc::clone(&order);
            scheduler.schedule(
                Duration::from_millis(ms),
                Box::new(move || order.borrow_mut().push(label)),
            );
        }

        scheduler.advance_ms(30);
        assert_eq!(*order.borrow(), vec!["early", "mid", "mid2", "late"]);
    }

    #[test]
    fn test_task_may_schedule_more_work() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        let inner = scheduler.clone();
        let follow_up = task();
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                inner.schedule(Duration::from_millis(10), follow_up);
            }),
        );

        assert_eq!(scheduler.advance_ms(15), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.advance_ms(5), 1);
        assert_eq!(count.get(), 1);
    }
}
