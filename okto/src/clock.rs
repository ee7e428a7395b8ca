//! Tick pacing.
use std::{
    thread,
    time::{Duration, Instant},
};

/// Timer to synchronize the host thread with the machine's tick rate.
///
/// It is designed to work with the yielding cooperative pattern of the
/// driver loop. When the machine yields control back to the caller,
/// time elapses until it is resumed. Once the driver is resumed, the
/// elapsed time is taken into account when determining the next cycle.
pub(crate) struct Clock {
    start: Instant,
    interval: Duration,
}

impl Clock {
    /// Creates a new clock with the current time as internal state.
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            start: Instant::now(),
            interval,
        }
    }

    /// Set the clock state back to zero.
    pub(crate) fn reset(&mut self) {
        self.start = Instant::now()
    }

    /// Block the current thread until the next clock cycle.
    pub(crate) fn wait(&mut self) {
        loop {
            if self.start.elapsed() < self.interval {
                // Sleep does not have enough resolution.
                //
                // Spinning a loop causes high CPU usage and fan madness.
                //
                // Yielding in a loop is the best alternative.
                thread::yield_now();
            } else {
                // Reset back to zero, rather than trying to catch up.
                self.reset();
                return;
            }
        }
    }
}
