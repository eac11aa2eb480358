//! Clock sources that hosts read `now` from.
//!
//! The engine itself never reads time; hosts pick a [`Clock`] and pass its
//! reading into every call.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::state::Tick;

pub trait Clock: Send + Sync {
    fn now(&self) -> Tick;
}

/// Milliseconds elapsed since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Tick {
        let elapsed = self.origin.elapsed().as_millis();
        Tick(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}

/// Clock moved only by explicit calls. Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Tick) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(now.as_millis())),
        }
    }

    /// Moves the clock to `now`. Earlier readings are ignored.
    pub fn set(&self, now: Tick) {
        self.millis.fetch_max(now.as_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Tick) -> Tick {
        let previous = self.millis.fetch_add(by.as_millis(), Ordering::SeqCst);
        Tick(previous) + by
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        Tick(self.millis.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_and_monotonic() {
        let clock = ManualClock::new();
        let view = clock.clone();

        assert_eq!(clock.advance(Tick::from_millis(250)), Tick(250));
        clock.set(Tick::from_secs(2));
        clock.set(Tick::from_secs(1));
        assert_eq!(view.now(), Tick::from_secs(2));
    }

    #[test]
    fn monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
