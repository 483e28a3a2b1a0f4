//! # Clock Port
//!
//! "Today" decides the default session date and "now" stamps export
//! documents. Both come through this trait so the rest of the crate stays
//! deterministic under test.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Source of the current date and time.
pub trait Clock {
    /// The calendar date a fresh session defaults to.
    fn today(&self) -> NaiveDate;

    /// The instant recorded as `createdAt` on export.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock: local calendar date, UTC timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Freezes the clock at `now`; `today()` is its UTC date.
    pub fn new(now: DateTime<Utc>) -> Self {
        FixedClock { now }
    }

    /// Freezes the clock at midday UTC on the given date.
    ///
    /// Returns `None` for an impossible date.
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .map(FixedClock::new)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::on(2026, 10, 19).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(clock.now().to_rfc3339(), "2026-10-19T12:00:00+00:00");
    }

    #[test]
    fn test_fixed_clock_rejects_impossible_date() {
        assert!(FixedClock::on(2026, 2, 30).is_none());
    }
}
