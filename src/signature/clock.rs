//! Wall-clock source for the signer

use std::sync::atomic::{AtomicUsize, Ordering};

/// Millisecond wall clock
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Reads the system clock through chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // Pre-epoch clocks clamp to zero
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Replays fixed instants in order, repeating the last one once exhausted
#[derive(Debug)]
pub struct FixedClock {
    instants: Vec<u64>,
    next: AtomicUsize,
}

impl FixedClock {
    /// `instants` must not be empty; an empty list reads as zero
    pub fn new(instants: impl Into<Vec<u64>>) -> Self {
        FixedClock {
            instants: instants.into(),
            next: AtomicUsize::new(0),
        }
    }

    /// Clock whose first read is `start` and every later read is `end`
    pub fn start_end(start: u64, end: u64) -> Self {
        Self::new(vec![start, end])
    }

    /// Rewind to the first instant
    pub fn rewind(&self) {
        self.next.store(0, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.instants
            .get(index)
            .or_else(|| self.instants.last())
            .copied()
            .unwrap_or(0)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_sequence() {
        let clock = FixedClock::start_end(100, 250);
        assert_eq!(clock.now_millis(), 100);
        assert_eq!(clock.now_millis(), 250);
        assert_eq!(clock.now_millis(), 250);

        clock.rewind();
        assert_eq!(clock.now_millis(), 100);
    }

    #[test]
    fn test_empty_fixed_clock_reads_zero() {
        assert_eq!(FixedClock::new(Vec::new()).now_millis(), 0);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
