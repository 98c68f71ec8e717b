//! Cancellable timer handles driven by simulated time.
//!
//! Nothing here sleeps or spawns threads.  The `Game` controller owns one
//! handle per purpose and feeds elapsed time through them, so a slot can never
//! hold two live timers at once.

use std::time::Duration;

/// Shortest period a timer will accept.  Keeps a degenerate period from
/// firing without ever letting simulated time move forward.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating timer.  `start` and `stop` are its only public mutators.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Option<Duration>,
    until_next: Duration,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm with `period`.  Any timer already running in this slot is
    /// cancelled first; the first firing comes one full period from now.
    pub fn start(&mut self, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.period = Some(period);
        self.until_next = period;
    }

    /// Cancel.  Returns whether a timer was actually running.
    pub fn stop(&mut self) -> bool {
        self.until_next = Duration::ZERO;
        self.period.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.period.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Time left before the next firing, if running.
    pub fn until_next(&self) -> Option<Duration> {
        self.period.map(|_| self.until_next)
    }

    pub(crate) fn elapse(&mut self, dt: Duration) {
        if self.period.is_some() {
            self.until_next = self.until_next.saturating_sub(dt);
        }
    }

    /// Consume a due firing and schedule the next one.
    pub(crate) fn take_due(&mut self) -> bool {
        match self.period {
            Some(period) if self.until_next.is_zero() => {
                self.until_next = period;
                true
            }
            _ => false,
        }
    }
}

/// The "request next frame" flag behind the render tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameDriver {
    requested: bool,
}

impl FrameDriver {
    pub fn request(&mut self) {
        self.requested = true;
    }

    pub fn cancel(&mut self) {
        self.requested = false;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Clear the request, reporting whether there was one.
    pub(crate) fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}
