use std::time::{Duration, Instant};

/// Default input poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Countdown resolution
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Get input poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// A recurring schedule owned by whoever should receive its ticks.
///
/// Ticks exist only while the value exists; dropping it cancels every future
/// tick. `take_due` reports each elapsed period once, however often it is
/// polled.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    period: Duration,
    next_due: Instant,
}

impl TickSchedule {
    pub fn start(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn every_second(now: Instant) -> Self {
        Self::start(now, COUNTDOWN_PERIOD)
    }

    /// Count periods that elapsed up to `now` and advance past them
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while now >= self.next_due {
            due += 1;
            self.next_due += self.period;
        }
        due
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_nothing_due_before_first_period() {
        let start = Instant::now();
        let mut schedule = TickSchedule::every_second(start);
        assert_eq!(schedule.take_due(start), 0);
        assert_eq!(schedule.take_due(start + Duration::from_millis(999)), 0);
        assert_eq!(schedule.time_until_next(start), COUNTDOWN_PERIOD);
    }

    #[test]
    fn test_each_period_reported_once() {
        let start = Instant::now();
        let mut schedule = TickSchedule::every_second(start);
        let later = start + Duration::from_millis(3500);

        assert_eq!(schedule.take_due(later), 3);
        // Polling again at the same instant must not fire again
        assert_eq!(schedule.take_due(later), 0);
        assert_eq!(schedule.take_due(start + Duration::from_secs(4)), 1);
    }
}
