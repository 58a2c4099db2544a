//! Debounced values with an injectable clock
//!
//! A [`Debounced`] value holds the last settled value and at most one
//! pending value with a deadline. Every `set` restarts the window; a
//! reader sees the pending value only once its deadline has passed.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests and simulations.
/// Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *elapsed = elapsed.saturating_add(by);
    }

    fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<Pending<T>>,
    window: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, window: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            window,
        }
    }

    /// Record new input at `now`, restarting the timer.
    /// Input equal to the settled value cancels any pending value.
    pub fn set(&mut self, value: T, now: Instant) {
        self.settle(now);
        if value == self.settled {
            self.pending = None;
        } else {
            self.pending = Some(Pending {
                value,
                deadline: now + self.window,
            });
        }
    }

    /// Replace the value immediately, dropping any pending input
    pub fn reset(&mut self, value: T) {
        self.settled = value;
        self.pending = None;
    }

    /// Promote a matured pending value. Returns true when the settled value changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if pending.deadline <= now => {
                let changed = pending.value != self.settled;
                self.settled = pending.value;
                changed
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Value visible at `now`
    pub fn value_at(&self, now: Instant) -> &T {
        match &self.pending {
            Some(pending) if pending.deadline <= now => &pending.value,
            _ => &self.settled,
        }
    }

    /// Most recent input, settled or not
    pub fn latest(&self) -> &T {
        self.pending
            .as_ref()
            .map(|pending| &pending.value)
            .unwrap_or(&self.settled)
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|pending| &pending.value)
    }

    pub fn is_pending_at(&self, now: Instant) -> bool {
        matches!(&self.pending, Some(pending) if pending.deadline > now)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_manual_clock_keeps_sub_millisecond_steps() {
        let clock = ManualClock::new();
        let shared = clock.clone();
        let before = clock.now();

        for _ in 0..4 {
            shared.advance(Duration::from_micros(250));
        }

        assert_eq!(clock.now() - before, Duration::from_millis(1));
    }

    #[test]
    fn test_value_appears_after_window() {
        let clock = ManualClock::new();
        let mut value = Debounced::new(String::new(), WINDOW);

        value.set("c".to_string(), clock.now());
        assert_eq!(value.value_at(clock.now()), "");
        assert!(value.is_pending_at(clock.now()));

        clock.advance(Duration::from_millis(299));
        assert_eq!(value.value_at(clock.now()), "");

        clock.advance(Duration::from_millis(1));
        assert_eq!(value.value_at(clock.now()), "c");
        assert!(!value.is_pending_at(clock.now()));
    }

    #[test]
    fn test_each_keystroke_restarts_window() {
        let clock = ManualClock::new();
        let mut value = Debounced::new(String::new(), WINDOW);

        for text in ["c", "co", "cof", "coffee"] {
            value.set(text.to_string(), clock.now());
            clock.advance(Duration::from_millis(200));
            assert_eq!(value.value_at(clock.now()), "");
        }

        clock.advance(Duration::from_millis(100));
        assert_eq!(value.value_at(clock.now()), "coffee");
        assert_eq!(value.latest(), "coffee");
    }

    #[test]
    fn test_returning_to_settled_value_cancels() {
        let clock = ManualClock::new();
        let mut value = Debounced::new(Some("rent".to_string()), WINDOW);

        value.set(Some("rentx".to_string()), clock.now());
        value.set(Some("rent".to_string()), clock.now());
        assert!(value.pending().is_none());

        clock.advance(WINDOW);
        assert_eq!(value.value_at(clock.now()).as_deref(), Some("rent"));
    }

    #[test]
    fn test_settle_promotes_matured_value() {
        let clock = ManualClock::new();
        let mut value = Debounced::new(0, WINDOW);
        value.set(5, clock.now());

        assert!(!value.settle(clock.now()));
        clock.advance(WINDOW);
        assert!(value.settle(clock.now()));
        assert!(value.pending().is_none());
        assert_eq!(*value.latest(), 5);
    }

    #[test]
    fn test_reset_and_cancel() {
        let clock = ManualClock::new();
        let mut value = Debounced::new(1, WINDOW);
        value.set(2, clock.now());
        value.cancel();
        clock.advance(WINDOW);
        assert_eq!(*value.value_at(clock.now()), 1);

        value.set(3, clock.now());
        value.reset(4);
        assert_eq!(*value.value_at(clock.now()), 4);
        assert!(value.pending().is_none());
    }

    #[test]
    fn test_zero_window_applies_immediately() {
        let clock = ManualClock::new();
        let mut value = Debounced::new(0, Duration::ZERO);
        value.set(7, clock.now());
        assert_eq!(*value.value_at(clock.now()), 7);
    }
}
