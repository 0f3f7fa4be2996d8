//! Meal schedule configuration.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use entities::MealType;
use serde::{Deserialize, Serialize};

use crate::Phase;

/// Hour at which all meal changes for the day lock (21:00).
pub const DAILY_CUTOFF_HOUR: u8 = 21;

/// A half-open range of whole hours, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl HourRange {
    /// Creates a range covering `[start, end)`.
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// Returns true if the hour falls inside the range.
    pub fn contains(&self, hour: u8) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// The single table of time rules shared by the policy evaluator, the state
/// machine, the reminder trigger and the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSchedule {
    /// Hour from which no opt-in changes are accepted.
    pub cutoff_hour: u8,
    /// Reconfirmation window for breakfast.
    pub breakfast: HourRange,
    /// Reconfirmation window for lunch.
    pub lunch: HourRange,
    /// Reconfirmation window for snacks.
    pub snacks: HourRange,
    /// Hours during which the evening deadline reminder may fire.
    pub evening_reminder: HourRange,
}

impl Default for MealSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl MealSchedule {
    /// The canteen's standard schedule.
    pub const fn standard() -> Self {
        Self {
            cutoff_hour: DAILY_CUTOFF_HOUR,
            breakfast: HourRange::new(7, 8),
            lunch: HourRange::new(10, 11),
            snacks: HourRange::new(14, 15),
            evening_reminder: HourRange::new(18, DAILY_CUTOFF_HOUR),
        }
    }

    /// Returns the reconfirmation window of a meal.
    pub fn window(&self, meal: MealType) -> HourRange {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Snacks => self.snacks,
        }
    }

    /// Returns true once the daily cutoff has passed.
    pub fn is_locked(&self, hour: u8) -> bool {
        hour >= self.cutoff_hour
    }

    /// Evaluates the lifecycle phase of a meal at the given hour.
    ///
    /// The daily cutoff wins over every per-meal window.
    pub fn phase(&self, hour: u8, meal: MealType) -> Phase {
        if self.is_locked(hour) {
            Phase::Locked
        } else if self.window(meal).contains(hour) {
            Phase::ReconfirmWindow
        } else {
            Phase::Open
        }
    }

    /// Evaluates the phase of a meal on `date`, as seen at `hour` on `today`.
    ///
    /// Past days are locked. Future days are open: opt changes are accepted
    /// but no reconfirmation window has started yet.
    pub fn phase_on(&self, today: NaiveDate, hour: u8, date: NaiveDate, meal: MealType) -> Phase {
        if date < today {
            Phase::Locked
        } else if date > today {
            Phase::Open
        } else {
            self.phase(hour, meal)
        }
    }

    /// Returns true if the evening deadline reminder applies at this hour.
    pub fn is_evening_reminder_hour(&self, hour: u8) -> bool {
        self.evening_reminder.contains(hour)
    }

    /// Time left before the daily cutoff, or `None` once it has passed.
    pub fn time_until_cutoff(&self, now: NaiveTime) -> Option<Duration> {
        let cutoff = NaiveTime::from_hms_opt(u32::from(self.cutoff_hour), 0, 0)?;
        if now >= cutoff {
            return None;
        }
        // Drop sub-second precision so countdowns tick in whole seconds.
        let now = now.with_nanosecond(0).unwrap_or(now);
        Some(cutoff - now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_are_half_open() {
        let schedule = MealSchedule::standard();
        let lunch = schedule.window(MealType::Lunch);

        assert!(!lunch.contains(9));
        assert!(lunch.contains(10));
        assert!(!lunch.contains(11));
    }

    #[test]
    fn test_phase_on_other_days() {
        let schedule = MealSchedule::standard();
        let today = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert_eq!(schedule.phase_on(today, 10, today, MealType::Lunch), Phase::ReconfirmWindow);
        assert_eq!(schedule.phase_on(today, 10, tomorrow, MealType::Lunch), Phase::Open);
        assert_eq!(schedule.phase_on(today, 22, tomorrow, MealType::Lunch), Phase::Open);
        assert_eq!(schedule.phase_on(today, 9, yesterday, MealType::Snacks), Phase::Locked);
    }

    #[test]
    fn test_time_until_cutoff() {
        let schedule = MealSchedule::standard();

        let left = schedule
            .time_until_cutoff(NaiveTime::from_hms_opt(18, 30, 15).unwrap())
            .unwrap();
        assert_eq!(left.num_hours(), 2);
        assert_eq!(left.num_minutes() % 60, 29);
        assert_eq!(left.num_seconds() % 60, 45);

        assert!(schedule
            .time_until_cutoff(NaiveTime::from_hms_opt(21, 0, 0).unwrap())
            .is_none());
    }

    #[test]
    fn test_schedule_is_deserializable() {
        let schedule: MealSchedule =
            serde_json::from_value(serde_json::to_value(MealSchedule::standard()).unwrap())
                .unwrap();
        assert_eq!(schedule, MealSchedule::standard());
    }
}
