//! Synthetic Calendar Clock
//!
//! The target board has no RTC and no network time. Calendar output is
//! synthesized purely from elapsed-milliseconds-since-boot plus the
//! reference date/time the device was flashed with: both functions here
//! are deterministic, stateless, and cheap enough to call every tick.
//!
//! ## The 30-Day-Month Rule
//!
//! Every month is treated as exactly [`DAYS_PER_MONTH`] days: day 30
//! rolls into day 1 of the next month, month 12 rolls into January of
//! the next year. The produced dates therefore drift from the real
//! calendar over long deployments. This is a known, accepted
//! approximation (see `constants.rs`); downstream tooling aligns runs
//! by the reference comment lines in the CSV header, not by absolute
//! dates.

use core::fmt::Write;

use crate::constants::{
    DAYS_PER_MONTH, MONTHS_PER_YEAR, MS_PER_SECOND, REFERENCE_DAY, REFERENCE_MONTH,
    REFERENCE_YEAR, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, START_HOUR,
    START_MINUTE,
};

/// Milliseconds since device boot.
pub type Timestamp = u64;

/// `"YYYY-MM-DD"`; sized for the widest year a `u64` of elapsed
/// milliseconds can produce.
pub type DateString = heapless::String<16>;

/// `"HH:MM:SS"`, always exactly eight characters.
pub type TimeString = heapless::String<8>;

/// Derives date and time-of-day strings from elapsed milliseconds.
///
/// Holds only the reference configuration; all per-call state is
/// derived from the `elapsed_ms` argument.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticClock {
    year: u32,
    month: u32,
    day: u32,
    start_hour: u32,
    start_minute: u32,
}

impl SyntheticClock {
    /// Clock with an explicit reference date and boot time-of-day.
    ///
    /// `month` is 1-12, `day` is 1-30 (simplified calendar), `hour`
    /// 0-23, `minute` 0-59. Values outside those ranges are not
    /// rejected; they simply shift the synthetic calendar.
    pub const fn new(year: u32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            start_hour: hour,
            start_minute: minute,
        }
    }

    /// Clock configured from the flash-time constants.
    pub const fn from_reference() -> Self {
        Self::new(
            REFERENCE_YEAR,
            REFERENCE_MONTH,
            REFERENCE_DAY,
            START_HOUR,
            START_MINUTE,
        )
    }

    /// Calendar date for the given elapsed time, as `"YYYY-MM-DD"`.
    ///
    /// Whole elapsed days are counted by midnights crossed: elapsed
    /// seconds plus the part of the reference day already consumed at
    /// boot, floor-divided by 86 400. The day count is added to the
    /// reference day-of-month and normalized with the 30-day-month
    /// rule.
    pub fn date_string(&self, elapsed_ms: Timestamp) -> DateString {
        let elapsed_s = elapsed_ms / MS_PER_SECOND;
        let into_reference_day = self.start_hour as u64 * SECONDS_PER_HOUR
            + self.start_minute as u64 * SECONDS_PER_MINUTE;
        let days_elapsed = (elapsed_s + into_reference_day) / SECONDS_PER_DAY;

        let mut day = self.day as u64 + days_elapsed;
        let mut month = self.month as u64;
        let mut year = self.year as u64;

        // Closed-form normalization of the roll rules: day > 30 rolls
        // the month, month > 12 rolls the year. The max(1) keeps a
        // mis-configured day/month of 0 from underflowing.
        let day0 = day.max(1) - 1;
        month = month.max(1) + day0 / DAYS_PER_MONTH as u64;
        day = day0 % DAYS_PER_MONTH as u64 + 1;
        year += (month - 1) / MONTHS_PER_YEAR as u64;
        month = (month - 1) % MONTHS_PER_YEAR as u64 + 1;

        let mut out = DateString::new();
        // Capacity covers the widest derivable year, so this cannot fail.
        let _ = write!(out, "{year:04}-{month:02}-{day:02}");
        out
    }

    /// Time of day for the given elapsed time, as `"HH:MM:SS"`.
    ///
    /// Elapsed time modulo 24 h, plus the boot hour/minute with a
    /// minute-to-hour carry; hours wrap modulo 24.
    pub fn time_string(&self, elapsed_ms: Timestamp) -> TimeString {
        let day_s = (elapsed_ms / MS_PER_SECOND) % SECONDS_PER_DAY;

        let second = day_s % SECONDS_PER_MINUTE;
        let mut minute = (day_s / SECONDS_PER_MINUTE) % SECONDS_PER_MINUTE;
        let mut hour = day_s / SECONDS_PER_HOUR;

        minute += self.start_minute as u64;
        if minute >= 60 {
            minute -= 60;
            hour += 1;
        }
        hour = (hour + self.start_hour as u64) % 24;

        let mut out = TimeString::new();
        let _ = write!(out, "{hour:02}:{minute:02}:{second:02}");
        out
    }
}

impl Default for SyntheticClock {
    fn default() -> Self {
        Self::from_reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MS_PER_SECOND;

    const MS_PER_HOUR: u64 = 3_600_000;
    const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

    #[test]
    fn boot_instant_reproduces_reference() {
        let clock = SyntheticClock::new(2025, 4, 29, 13, 20);
        assert_eq!(clock.date_string(0).as_str(), "2025-04-29");
        assert_eq!(clock.time_string(0).as_str(), "13:20:00");
    }

    #[test]
    fn one_hour_advances_time_only() {
        let clock = SyntheticClock::new(2025, 4, 29, 13, 20);
        assert_eq!(clock.time_string(MS_PER_HOUR).as_str(), "14:20:00");
        assert_eq!(clock.date_string(MS_PER_HOUR).as_str(), "2025-04-29");
    }

    #[test]
    fn date_rolls_at_the_first_midnight() {
        let clock = SyntheticClock::new(2025, 4, 29, 13, 20);

        // 13:20 boot leaves 10h40m of the reference day.
        let remaining_ms = (10 * 3600 + 40 * 60) as u64 * MS_PER_SECOND;
        assert_eq!(clock.date_string(remaining_ms - 1000).as_str(), "2025-04-29");
        assert_eq!(clock.date_string(remaining_ms).as_str(), "2025-04-30");
    }

    #[test]
    fn day_30_rolls_into_next_month_not_day_31() {
        let clock = SyntheticClock::new(2025, 4, 29, 13, 20);

        let remaining_ms = (10 * 3600 + 40 * 60) as u64 * MS_PER_SECOND;
        assert_eq!(clock.date_string(remaining_ms).as_str(), "2025-04-30");
        assert_eq!(
            clock.date_string(remaining_ms + MS_PER_DAY).as_str(),
            "2025-05-01"
        );
    }

    #[test]
    fn december_rolls_into_next_year() {
        let clock = SyntheticClock::new(2025, 12, 30, 0, 0);
        assert_eq!(clock.date_string(MS_PER_DAY).as_str(), "2026-01-01");
    }

    #[test]
    fn minute_carry_propagates_into_hours() {
        let clock = SyntheticClock::new(2025, 4, 29, 13, 45);
        // 20 minutes elapsed: 13:45 + 0:20 = 14:05.
        assert_eq!(clock.time_string(20 * 60 * 1000).as_str(), "14:05:00");
    }

    #[test]
    fn hours_wrap_modulo_24() {
        let clock = SyntheticClock::new(2025, 4, 29, 23, 50);
        assert_eq!(clock.time_string(15 * 60 * 1000).as_str(), "00:05:00");
    }

    #[test]
    fn date_is_monotonic_across_a_run() {
        let clock = SyntheticClock::from_reference();
        let mut previous = clock.date_string(0);

        // Fixed-width "YYYY-MM-DD" compares chronologically as a string.
        for tick in 1..200u64 {
            let current = clock.date_string(tick * 6 * MS_PER_HOUR);
            assert!(current.as_str() >= previous.as_str());
            previous = current;
        }
    }
}
