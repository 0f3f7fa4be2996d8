//! Wall-clock and simulated time sources.

use std::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

/// Clock errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    /// A simulated hour outside 0-23.
    #[error("hour {0} is out of range (expected 0-23)")]
    HourOutOfRange(u8),
}

/// Source of "now" for the time policy.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current hour, 0-23.
    fn hour(&self) -> u8 {
        self.now().hour() as u8
    }

    /// Current date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// The date after today.
    fn tomorrow(&self) -> NaiveDate {
        let today = self.today();
        today.succ_opt().unwrap_or(today)
    }
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a settable hour.
///
/// The date is either fixed at construction or follows the local calendar;
/// minutes and seconds are always zero.
#[derive(Debug)]
pub struct SimulatedClock {
    date: Option<NaiveDate>,
    hour: AtomicU8,
}

impl SimulatedClock {
    /// Creates a clock at `hour` on today's local date.
    pub fn new(hour: u8) -> Result<Self, ClockError> {
        validate_hour(hour)?;
        Ok(Self {
            date: None,
            hour: AtomicU8::new(hour),
        })
    }

    /// Creates a clock at `hour` on a fixed date.
    pub fn at(date: NaiveDate, hour: u8) -> Result<Self, ClockError> {
        validate_hour(hour)?;
        Ok(Self {
            date: Some(date),
            hour: AtomicU8::new(hour),
        })
    }

    /// Moves the clock to another hour of the same day.
    pub fn set_hour(&self, hour: u8) -> Result<(), ClockError> {
        validate_hour(hour)?;
        self.hour.store(hour, Ordering::SeqCst);
        Ok(())
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> NaiveDateTime {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let hour = u32::from(self.hour.load(Ordering::SeqCst));
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
        date.and_time(time)
    }
}

fn validate_hour(hour: u8) -> Result<(), ClockError> {
    if hour > 23 {
        return Err(ClockError::HourOutOfRange(hour));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let clock = SimulatedClock::at(date, 9).unwrap();

        assert_eq!(clock.hour(), 9);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.tomorrow(), NaiveDate::from_ymd_opt(2024, 5, 7).unwrap());

        clock.set_hour(21).unwrap();
        assert_eq!(clock.hour(), 21);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_out_of_range_hour_is_rejected() {
        assert_eq!(
            SimulatedClock::new(24).unwrap_err(),
            ClockError::HourOutOfRange(24)
        );

        let clock = SimulatedClock::new(3).unwrap();
        assert!(clock.set_hour(30).is_err());
        assert_eq!(clock.hour(), 3);
    }
}
