//! Calendar-day bookkeeping: the clock, elapsed days, and rest healing.
//!
//! Time is tracked at date granularity only. Two events on the same
//! calendar date are zero days apart no matter how many hours separate
//! them, and any date in the future of "today" also counts as zero.

use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDate};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// The host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that reports a settable date.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Start the clock at `today`.
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Move the clock to `date`.
    pub fn set(&self, date: NaiveDate) {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Move the clock forward by `days` calendar days. Saturates at the
    /// last representable date.
    pub fn advance_days(&self, days: u32) {
        let mut today = self.today.lock().unwrap_or_else(PoisonError::into_inner);
        *today = today
            .checked_add_days(chrono::Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whole calendar days from `last` to `today`; zero when `today` is not
/// after `last`.
pub fn elapsed_days(last: NaiveDate, today: NaiveDate) -> u32 {
    let days = today.signed_duration_since(last).num_days();
    u32::try_from(days).unwrap_or(if days < 0 { 0 } else { u32::MAX })
}

/// Hit points after resting `days` days at `heal_per_day`, capped at
/// `max_hp`.
pub fn rest_heal(hp: i64, days: u32, heal_per_day: u32, max_hp: i64) -> i64 {
    let gain = i64::from(heal_per_day).saturating_mul(i64::from(days));
    hp.saturating_add(gain).min(max_hp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn same_date_is_zero_days() {
        assert_eq!(elapsed_days(day(2026, 3, 1), day(2026, 3, 1)), 0);
    }

    #[test]
    fn whole_days_between_dates() {
        assert_eq!(elapsed_days(day(2026, 3, 1), day(2026, 3, 2)), 1);
        assert_eq!(elapsed_days(day(2026, 2, 27), day(2026, 3, 2)), 3);
        assert_eq!(elapsed_days(day(2025, 12, 31), day(2026, 12, 31)), 365);
    }

    #[test]
    fn future_last_activity_is_zero_days() {
        assert_eq!(elapsed_days(day(2026, 3, 5), day(2026, 3, 1)), 0);
    }

    #[test]
    fn heal_is_capped() {
        assert_eq!(rest_heal(40, 2, 10, 100), 60);
        assert_eq!(rest_heal(95, 1, 10, 100), 100);
        assert_eq!(rest_heal(10, u32::MAX, u32::MAX, 100), 100);
        for days in 1..=30 {
            for hp in [-20, 0, 1, 50, 99, 100] {
                assert!(rest_heal(hp, days, 10, 100) <= 100);
            }
        }
    }

    #[test]
    fn fixed_clock_moves() {
        let clock = FixedClock::new(day(2026, 1, 30));
        assert_eq!(clock.today(), day(2026, 1, 30));
        clock.advance_days(3);
        assert_eq!(clock.today(), day(2026, 2, 2));
        clock.set(day(2027, 6, 1));
        assert_eq!(clock.today(), day(2027, 6, 1));
    }
}
