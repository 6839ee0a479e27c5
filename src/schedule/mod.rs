//! Deferred task scheduling.
//!
//! Behaviors never sleep: they hand a task and a delay to a [`Scheduler`]
//! and return. [`VirtualClock`] runs tasks when told to advance, which makes
//! timing deterministic in tests and lets the terminal preview drive it from
//! real timers. The browser backend wraps `setTimeout`.

mod virtual_clock;

pub use virtual_clock::VirtualClock;

use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    /// Time elapsed since the scheduler's origin.
    fn now(&self) -> Duration;

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TimerId;

    /// Drop a pending task. Unknown or already-run ids are ignored.
    fn cancel(&self, id: TimerId);
}

/// Time between two millisecond readings of a monotonic clock such as
/// `performance.now()`. A reading behind `origin` counts as no time.
pub fn elapsed_millis(origin: f64, now: f64) -> Duration {
    let millis = now - origin;
    if millis.is_nan() || millis <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_millis() {
        assert_eq!(elapsed_millis(250.0, 1250.0), Duration::from_secs(1));
        assert_eq!(elapsed_millis(1000.0, 1000.0), Duration::ZERO);
        assert_eq!(elapsed_millis(1000.0, 400.0), Duration::ZERO);
        assert_eq!(elapsed_millis(0.0, f64::NAN), Duration::ZERO);
        assert_eq!(elapsed_millis(0.0, f64::INFINITY), Duration::MAX);
    }
}
