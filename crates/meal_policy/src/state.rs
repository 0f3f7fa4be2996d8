//! Per-meal confirmation state.

use std::fmt;

use entities::{MealConfirmation, MealType};
use serde::{Deserialize, Serialize};

use crate::Phase;

/// State of one meal for one user on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealState {
    /// No record exists for the day and nothing was chosen.
    NotOptedIn,
    /// Opted in, waiting for reconfirmation.
    OptedInPendingReconfirm,
    /// Opted in and reconfirmed. Terminal for the day.
    Reconfirmed,
    /// A record exists but the meal is not opted in.
    OptedOut,
    /// The daily cutoff has passed without a reconfirmation.
    Locked,
}

impl MealState {
    /// Derives the state from an optional stored record and the current phase.
    ///
    /// Precedence: a reconfirmed meal stays `Reconfirmed` after the cutoff;
    /// anything else reads as `Locked` once the phase is locked.
    pub fn derive(record: Option<&MealConfirmation>, meal: MealType, phase: Phase) -> Self {
        let selection = record.map(|r| *r.meal(meal)).unwrap_or_default();

        if selection.opted_in && selection.reconfirmed {
            MealState::Reconfirmed
        } else if phase == Phase::Locked {
            MealState::Locked
        } else if selection.opted_in {
            MealState::OptedInPendingReconfirm
        } else if record.is_some() {
            MealState::OptedOut
        } else {
            MealState::NotOptedIn
        }
    }
}

impl fmt::Display for MealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MealState::NotOptedIn => "not opted in",
            MealState::OptedInPendingReconfirm => "opted in, pending reconfirmation",
            MealState::Reconfirmed => "reconfirmed",
            MealState::OptedOut => "opted out",
            MealState::Locked => "locked",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record() -> MealConfirmation {
        MealConfirmation::new("emp123", NaiveDate::from_ymd_opt(2024, 5, 6).unwrap())
    }

    #[test]
    fn test_absent_and_present_records() {
        let meal = MealType::Lunch;
        assert_eq!(MealState::derive(None, meal, Phase::Open), MealState::NotOptedIn);
        assert_eq!(
            MealState::derive(Some(&record()), meal, Phase::Open),
            MealState::OptedOut
        );
    }

    #[test]
    fn test_opted_in_states() {
        let mut r = record();
        r.set_opt_in(MealType::Lunch, true);
        assert_eq!(
            MealState::derive(Some(&r), MealType::Lunch, Phase::ReconfirmWindow),
            MealState::OptedInPendingReconfirm
        );

        r.mark_reconfirmed(MealType::Lunch);
        assert_eq!(
            MealState::derive(Some(&r), MealType::Lunch, Phase::Open),
            MealState::Reconfirmed
        );
    }

    #[test]
    fn test_cutoff_locks_everything_but_reconfirmed() {
        let mut r = record();
        r.set_opt_in(MealType::Breakfast, true);
        r.set_opt_in(MealType::Lunch, true);
        r.mark_reconfirmed(MealType::Lunch);

        assert_eq!(
            MealState::derive(Some(&r), MealType::Breakfast, Phase::Locked),
            MealState::Locked
        );
        assert_eq!(
            MealState::derive(Some(&r), MealType::Lunch, Phase::Locked),
            MealState::Reconfirmed
        );
        assert_eq!(
            MealState::derive(None, MealType::Snacks, Phase::Locked),
            MealState::Locked
        );
    }
}
