use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::Duration;

use super::{Scheduler, Task, TimerId};

/// Manually advanced clock.
///
/// Tasks are ordered by deadline, then by scheduling order. A task that
/// schedules another task with zero delay runs within the same `advance`.
#[derive(Default)]
pub struct VirtualClock {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<BTreeMap<(Duration, u64), Task>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.borrow().keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest task due at or before `limit`.
    fn pop_due(&self, limit: Duration) -> Option<(Duration, Task)> {
        let mut queue = self.queue.borrow_mut();
        let key = *queue.keys().next()?;
        if key.0 > limit {
            return None;
        }
        queue.remove(&key).map(|task| (key.0, task))
    }

    /// Move time forward by `by`, running every task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;
        while let Some((deadline, task)) = self.pop_due(target) {
            self.now.set(deadline);
            task();
            ran += 1;
        }
        self.now.set(target);
        ran
    }

    /// Jump to the earliest pending task and run it.
    ///
    /// Returns the time advanced, or `None` when nothing is pending.
    pub fn run_next(&self) -> Option<Duration> {
        let before = self.now.get();
        let (deadline, task) = self.pop_due(Duration::MAX)?;
        self.now.set(deadline);
        task();
        Some(deadline - before)
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let deadline = self.now.get().saturating_add(delay);
        self.queue.borrow_mut().insert((deadline, id), task);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        self.queue.borrow_mut().retain(|(_, seq), _| *seq != id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &'static str| -> Task {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_runs_in_deadline_order() {
        let clock = VirtualClock::new();
        let (log, task) = recorder();

        clock.schedule(ms(200), task("late"));
        clock.schedule(ms(100), task("early"));
        clock.schedule(ms(100), task("early-second"));

        assert_eq!(clock.advance(ms(150)), 2);
        assert_eq!(*log.borrow(), vec!["early", "early-second"]);
        assert_eq!(clock.now(), ms(150));

        assert_eq!(clock.advance(ms(50)), 1);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let clock = VirtualClock::new();
        let (log, task) = recorder();

        let id = clock.schedule(ms(10), task("cancelled"));
        clock.schedule(ms(20), task("kept"));
        clock.cancel(id);
        clock.cancel(id);

        clock.advance(ms(100));
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_task_can_reschedule() {
        let clock = Rc::new(VirtualClock::new());
        let count = Rc::new(Cell::new(0));

        fn tick(clock: Rc<VirtualClock>, count: Rc<Cell<u32>>) {
            count.set(count.get() + 1);
            let next = Rc::clone(&clock);
            clock.schedule(ms(100), Box::new(move || tick(next, count)));
        }

        let first = Rc::clone(&clock);
        let counter = Rc::clone(&count);
        clock.schedule(ms(0), Box::new(move || tick(first, counter)));

        clock.advance(ms(350));
        // t = 0, 100, 200, 300
        assert_eq!(count.get(), 4);
        assert_eq!(clock.next_deadline(), Some(ms(400)));
    }

    #[test]
    fn test_run_next_reports_elapsed() {
        let clock = VirtualClock::new();
        assert_eq!(clock.run_next(), None);

        clock.advance(ms(5));
        clock.schedule(ms(80), Box::new(|| {}));
        assert_eq!(clock.run_next(), Some(ms(80)));
        assert_eq!(clock.now(), ms(85));
    }
}
