//! Debounce gate for reload signals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

const NEVER: u64 = 0;

/// Accepts at most one event per window.
///
/// The last accepted timestamp is stored as nanoseconds since the gate was
/// created (offset by one so zero can mean "nothing accepted yet") and is
/// updated with compare-and-swap, so concurrent callers never both win the
/// same window.
#[derive(Debug)]
pub struct DebounceGate {
    origin: Instant,
    window: Duration,
    last_accepted: AtomicU64,
}

impl DebounceGate {
    pub fn new(window: Duration) -> Self {
        Self {
            origin: Instant::now(),
            window,
            last_accepted: AtomicU64::new(NEVER),
        }
    }

    /// Accept an event observed at `at` if at least the window has passed
    /// since the last accepted one. Accepting records `at` as the new last
    /// accepted time. Events older than the last accepted one are rejected.
    pub fn try_accept(&self, at: Instant) -> bool {
        let stamp = self.stamp(at);
        let window = nanos(self.window);
        let mut last = self.last_accepted.load(Ordering::Acquire);

        loop {
            if last != NEVER && stamp.saturating_sub(last) < window {
                return false;
            }

            match self.last_accepted.compare_exchange_weak(
                last,
                stamp,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => last = actual,
            }
        }
    }

    fn stamp(&self, at: Instant) -> u64 {
        nanos(at.saturating_duration_since(self.origin)).saturating_add(1)
    }
}

fn nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
