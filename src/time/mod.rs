// Timing abstractions - monotonic clocks and host-owned timers
// The core never assumes a timer primitive; the host schedules ticks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic clock, read as elapsed time since an arbitrary origin.
///
/// Production hosts use [`SystemClock`]; tests inject a [`ManualClock`] so
/// deferred work (voice disposal tails) can be exercised deterministically.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real clock backed by `Instant`.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Stored as whole microseconds in an atomic so shared references can
/// advance it without locking.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            micros: AtomicU64::new(0),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.micros
            .fetch_add(delta.as_micros() as u64, Ordering::Relaxed);
    }

    /// Jump the clock to an absolute time.
    pub fn set(&self, to: Duration) {
        self.micros.store(to.as_micros() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }
}

/// Opaque handle to a periodic timer owned by the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Host-owned scheduler for periodic timers.
///
/// A running sequencer holds exactly one handle obtained from
/// `set_interval`; the host is expected to call the sequencer's `tick` at
/// that period until the handle is cleared. `clear_interval` on an already
/// cleared handle must be a no-op.
pub trait TimerDriver {
    fn set_interval(&mut self, period: Duration) -> TimerHandle;
    fn clear_interval(&mut self, handle: TimerHandle);
}

/// Driver that only records requests; ticks are delivered by hand.
///
/// Used by tests and headless hosts that pump their own event loop.
#[derive(Debug, Default)]
pub struct ManualTimerDriver {
    next_handle: u64,
    active: Vec<(TimerHandle, Duration)>,
}

impl ManualTimerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers currently scheduled, in creation order.
    pub fn active_timers(&self) -> &[(TimerHandle, Duration)] {
        &self.active
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.active.iter().any(|(h, _)| *h == handle)
    }

    /// Period of a scheduled timer, if still active.
    pub fn period_of(&self, handle: TimerHandle) -> Option<Duration> {
        self.active
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| *p)
    }
}

impl TimerDriver for ManualTimerDriver {
    fn set_interval(&mut self, period: Duration) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.active.push((handle, period));
        handle
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        self.active.retain(|(h, _)| *h != handle);
    }
}
