//! Source of "today" for the engine.
//!
//! Everything date-dependent goes through [`Clock`] so hosts and tests can
//! pin the calendar date instead of reading the wall clock.

use std::cell::Cell;

use chrono::{Duration, Local, NaiveDate};

pub trait Clock {
    /// Current calendar date in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a settable date.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move the clock forward by `days` calendar days.
    pub fn advance_days(&self, days: i64) {
        self.today.set(self.today.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let clock = FixedClock::new(start);
        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn borrowed_clock_reads_through() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let clock = FixedClock::new(start);
        let by_ref: &FixedClock = &clock;
        clock.set(NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
        assert_eq!(Clock::today(&by_ref), NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
    }
}
