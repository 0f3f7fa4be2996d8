//! Lifecycle phase of a meal.

use std::fmt;

use entities::MealType;
use serde::{Deserialize, Serialize};

use crate::MealSchedule;

/// Where a meal stands in its daily lifecycle at a given hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Opt-in and opt-out are accepted.
    Open,
    /// The meal's reconfirmation window is open. Opt-in and opt-out are
    /// still accepted.
    ReconfirmWindow,
    /// The daily cutoff has passed; the day's choices are frozen.
    Locked,
}

impl Phase {
    /// Returns true if opt-in/opt-out changes are accepted.
    pub fn allows_opt_change(&self) -> bool {
        !matches!(self, Phase::Locked)
    }

    /// Returns true if reconfirmation is accepted.
    pub fn allows_reconfirmation(&self) -> bool {
        matches!(self, Phase::ReconfirmWindow)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Open => "open",
            Phase::ReconfirmWindow => "reconfirm window",
            Phase::Locked => "locked",
        };
        f.write_str(s)
    }
}

/// Evaluates the phase of a meal at an hour using the standard schedule.
pub fn phase_for(hour: u8, meal: MealType) -> Phase {
    MealSchedule::standard().phase(hour, meal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_outside_windows_are_open() {
        let open_hours = (0..7).chain(8..10).chain(11..14).chain(15..21);
        for hour in open_hours {
            for meal in MealType::ALL {
                assert_eq!(phase_for(hour, meal), Phase::Open, "hour {hour}, {meal}");
            }
        }
    }

    #[test]
    fn test_each_meal_window() {
        assert_eq!(phase_for(7, MealType::Breakfast), Phase::ReconfirmWindow);
        assert_eq!(phase_for(10, MealType::Lunch), Phase::ReconfirmWindow);
        assert_eq!(phase_for(14, MealType::Snacks), Phase::ReconfirmWindow);

        // Windows of other meals do not leak.
        assert_eq!(phase_for(7, MealType::Lunch), Phase::Open);
        assert_eq!(phase_for(10, MealType::Snacks), Phase::Open);
        assert_eq!(phase_for(14, MealType::Breakfast), Phase::Open);
    }

    #[test]
    fn test_cutoff_locks_every_meal() {
        for hour in 21..24 {
            for meal in MealType::ALL {
                let phase = phase_for(hour, meal);
                assert_eq!(phase, Phase::Locked);
                assert!(!phase.allows_opt_change());
                assert!(!phase.allows_reconfirmation());
            }
        }
    }

    #[test]
    fn test_window_allows_opt_change() {
        assert!(Phase::ReconfirmWindow.allows_opt_change());
        assert!(Phase::ReconfirmWindow.allows_reconfirmation());
        assert!(!Phase::Open.allows_reconfirmation());
    }
}
