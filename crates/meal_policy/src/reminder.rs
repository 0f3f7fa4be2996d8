//! One-shot reconfirmation and evening reminders.

use std::collections::HashSet;

use chrono::NaiveDate;
use entities::{MealConfirmation, MealType};
use serde::Serialize;
use tracing::debug;

use crate::MealSchedule;

/// A cue shown to the user. Reminders never change confirmation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reminder {
    /// The reconfirmation window of an opted-in meal just opened.
    Reconfirm { meal: MealType, hour: u8 },
    /// Evening nudge to finish meal selection before the cutoff.
    EveningDeadline { hour: u8, cutoff_hour: u8 },
}

impl Reminder {
    /// Notification title.
    pub fn title(&self) -> String {
        match self {
            Reminder::Reconfirm { .. } => "Reconfirmation Required".to_string(),
            Reminder::EveningDeadline { .. } => "Meal Confirmation Deadline".to_string(),
        }
    }

    /// Notification body.
    pub fn body(&self) -> String {
        match self {
            Reminder::Reconfirm { meal, .. } => format!(
                "The window for {} is open! Please reconfirm if you'll be having it.",
                meal
            ),
            Reminder::EveningDeadline { hour, cutoff_hour } => {
                let left = cutoff_hour.saturating_sub(*hour);
                format!(
                    "Please confirm your meals before {}:00. {} hour(s) remaining.",
                    cutoff_hour, left
                )
            }
        }
    }
}

/// Tracks which reminders a session has already seen today.
///
/// Each meal's reconfirmation reminder fires once, the first time an observed
/// hour falls in its window while the meal is opted in and not reconfirmed.
/// The evening reminder fires once per distinct evening hour. A confirmation
/// for a different date starts a new day and clears both sets, even when the
/// midnight tick was never observed.
#[derive(Debug, Clone, Default)]
pub struct ReminderTracker {
    schedule: MealSchedule,
    day: Option<NaiveDate>,
    alerted_meals: HashSet<MealType>,
    evening_hours: HashSet<u8>,
}

impl ReminderTracker {
    /// Creates a tracker for a schedule.
    pub fn new(schedule: MealSchedule) -> Self {
        Self {
            schedule,
            day: None,
            alerted_meals: HashSet::new(),
            evening_hours: HashSet::new(),
        }
    }

    /// Evaluates the reminders due at `hour` for today's confirmation.
    pub fn observe(&mut self, hour: u8, confirmation: &MealConfirmation) -> Vec<Reminder> {
        if self.day != Some(confirmation.date) {
            self.reset();
            self.day = Some(confirmation.date);
        }

        let mut due = Vec::new();

        for meal in MealType::ALL {
            if !self.schedule.window(meal).contains(hour) {
                continue;
            }
            if !confirmation.meal(meal).is_pending_reconfirmation() {
                continue;
            }
            if self.alerted_meals.insert(meal) {
                debug!(%meal, hour, "Reconfirmation reminder due");
                due.push(Reminder::Reconfirm { meal, hour });
            }
        }

        if self.schedule.is_evening_reminder_hour(hour) && self.evening_hours.insert(hour) {
            due.push(Reminder::EveningDeadline {
                hour,
                cutoff_hour: self.schedule.cutoff_hour,
            });
        }

        due
    }

    /// Forgets every reminder already shown.
    pub fn reset(&mut self) {
        self.alerted_meals.clear();
        self.evening_hours.clear();
    }
}
