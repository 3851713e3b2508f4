//! Sources of the current time.
//!
//! The scheduler itself takes `now` as an argument; callers obtain it from a
//! [`Clock`] so tests can pin time and the app can preview future days.

use chrono::{DateTime, Duration, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wraps another clock and shifts it forward by a whole number of days.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetClock<C> {
    inner: C,
    offset_days: i64,
}

impl<C: Clock> OffsetClock<C> {
    pub fn new(inner: C, offset_days: i64) -> Self {
        Self { inner, offset_days }
    }

    pub fn offset_days(&self) -> i64 {
        self.offset_days
    }

    pub fn set_offset_days(&mut self, offset_days: i64) {
        self.offset_days = offset_days;
    }
}

impl<C: Clock> Clock for OffsetClock<C> {
    fn now(&self) -> DateTime<Utc> {
        self.inner.now() + Duration::days(self.offset_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }

    #[test]
    fn test_offset_clock_shifts_by_days() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut clock = OffsetClock::new(FixedClock(instant), 2);
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 3, 3, 9, 0, 0).unwrap());

        clock.set_offset_days(0);
        assert_eq!(clock.now(), instant);
    }
}
