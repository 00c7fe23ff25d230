use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Source of one-second ticks for a running timer.
pub trait Cadence {
    /// Number of ticks owed since the last call. `running` tells the source
    /// whether the timer is counting; while it is not, nothing accrues.
    fn due_ticks(&mut self, running: bool) -> u32;
}

/// Wall-clock cadence backed by a monotonic [`Instant`].
///
/// A partial second is dropped whenever the timer is seen stopped, so a
/// pause never gains or loses time against the countdown.
#[derive(Debug, Clone)]
pub struct IntervalCadence {
    interval: Duration,
    anchor: Option<Instant>,
}

impl Default for IntervalCadence {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl IntervalCadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            anchor: None,
        }
    }

    pub fn due_ticks_at(&mut self, now: Instant, running: bool) -> u32 {
        if !running || self.interval.is_zero() {
            self.anchor = None;
            return 0;
        }

        let Some(anchor) = self.anchor else {
            self.anchor = Some(now);
            return 0;
        };

        let elapsed = now.saturating_duration_since(anchor);
        let ticks = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        if ticks > 0 {
            self.anchor = Some(anchor + self.interval * ticks);
        }
        ticks
    }

    /// Time left until the next tick falls due, if the cadence is armed.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.anchor
            .map(|anchor| (anchor + self.interval).saturating_duration_since(now))
    }
}

impl Cadence for IntervalCadence {
    fn due_ticks(&mut self, running: bool) -> u32 {
        self.due_ticks_at(Instant::now(), running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_arms_without_ticking() {
        let mut cadence = IntervalCadence::default();
        let start = Instant::now();
        assert_eq!(cadence.due_ticks_at(start, true), 0);
        assert_eq!(cadence.until_next(start), Some(TICK_INTERVAL));
    }

    #[test]
    fn test_counts_whole_seconds_and_keeps_remainder() {
        let mut cadence = IntervalCadence::default();
        let start = Instant::now();
        cadence.due_ticks_at(start, true);

        assert_eq!(cadence.due_ticks_at(start + Duration::from_millis(999), true), 0);
        assert_eq!(cadence.due_ticks_at(start + Duration::from_millis(1000), true), 1);
        assert_eq!(cadence.due_ticks_at(start + Duration::from_millis(3500), true), 2);
        assert_eq!(cadence.due_ticks_at(start + Duration::from_millis(4000), true), 1);
    }

    #[test]
    fn test_stopped_timer_drops_partial_second() {
        let mut cadence = IntervalCadence::default();
        let start = Instant::now();
        cadence.due_ticks_at(start, true);
        assert_eq!(cadence.due_ticks_at(start + Duration::from_millis(900), false), 0);
        assert_eq!(cadence.until_next(start), None);

        // Resuming re-arms from the resume instant.
        let resume = start + Duration::from_secs(10);
        assert_eq!(cadence.due_ticks_at(resume, true), 0);
        assert_eq!(cadence.due_ticks_at(resume + Duration::from_millis(500), true), 0);
        assert_eq!(cadence.due_ticks_at(resume + Duration::from_millis(1000), true), 1);
    }
}
