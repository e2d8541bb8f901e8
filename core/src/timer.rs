use std::time::{Duration, Instant};

/// Wall-clock gate for the 60Hz delay and sound timers.
///
/// Time is measured in whole intervals since the last decrement. The reference
/// point only ever moves forward by whole intervals, so leftover time carries
/// into the next call instead of drifting.
#[derive(Debug, Clone, Copy)]
pub struct TimerClock {
    interval: Duration,
    last_tick: Instant,
}

impl TimerClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        TimerClock {
            interval,
            last_tick: now,
        }
    }

    /// Restarts counting from `now`, discarding any partial interval.
    pub fn restart(&mut self, now: Instant) {
        self.last_tick = now;
    }

    /// Returns how many whole intervals have elapsed by `now` and consumes them.
    ///
    /// A `now` earlier than the last tick counts as no time passing.
    pub fn elapsed_ticks(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let ticks = elapsed.as_nanos() / self.interval.as_nanos().max(1);
        if ticks == 0 {
            return 0;
        }
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.last_tick += self.interval * ticks;
        ticks
    }
}

/// Counts a timer down by `ticks`, stopping at 0.
pub fn decay(timer: u8, ticks: u32) -> u8 {
    let ticks = u8::try_from(ticks).unwrap_or(u8::MAX);
    timer.saturating_sub(ticks)
}
