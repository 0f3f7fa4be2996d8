//! Meal confirmation entity definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MealType;

/// Opt-in and reconfirmation flags for a single meal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSelection {
    /// Initial opt-in.
    #[serde(default)]
    pub opted_in: bool,
    /// Final reconfirmation. Only meaningful while `opted_in` is true.
    #[serde(default)]
    pub reconfirmed: bool,
}

impl MealSelection {
    /// Returns true if the meal is opted in but not yet reconfirmed.
    pub fn is_pending_reconfirmation(&self) -> bool {
        self.opted_in && !self.reconfirmed
    }
}

/// One `MealSelection` per meal slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSelections {
    #[serde(default, rename = "Breakfast")]
    pub breakfast: MealSelection,
    #[serde(default, rename = "Lunch")]
    pub lunch: MealSelection,
    #[serde(default, rename = "Snacks")]
    pub snacks: MealSelection,
}

impl MealSelections {
    /// Returns the selection for a meal.
    pub fn get(&self, meal: MealType) -> &MealSelection {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Snacks => &self.snacks,
        }
    }

    /// Returns the selection for a meal, mutably.
    pub fn get_mut(&mut self, meal: MealType) -> &mut MealSelection {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Snacks => &mut self.snacks,
        }
    }

    /// Iterates over all meals in serving order.
    pub fn iter(&self) -> impl Iterator<Item = (MealType, &MealSelection)> {
        MealType::ALL.into_iter().map(move |meal| (meal, self.get(meal)))
    }
}

/// An employee's meal plan for a single day.
///
/// Exactly one record exists per `(user_id, date)`. A record that has not
/// been written yet is equivalent to [`MealConfirmation::new`], where every
/// flag is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealConfirmation {
    /// Owning user ID.
    pub user_id: String,
    /// Calendar date the plan applies to.
    pub date: NaiveDate,
    /// Per-meal flags.
    #[serde(default)]
    pub meals: MealSelections,
    /// Work-from-home intention for this date.
    #[serde(default)]
    pub wfh: bool,
}

impl MealConfirmation {
    /// Creates the default (all flags false) confirmation for a user and date.
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            meals: MealSelections::default(),
            wfh: false,
        }
    }

    /// Returns the document ID for a user and date, e.g. `emp123-2024-05-06`.
    pub fn record_id(user_id: &str, date: NaiveDate) -> String {
        format!("{}-{}", user_id, date.format("%Y-%m-%d"))
    }

    /// Returns this record's document ID.
    pub fn id(&self) -> String {
        Self::record_id(&self.user_id, self.date)
    }

    /// Returns the selection for a meal.
    pub fn meal(&self, meal: MealType) -> &MealSelection {
        self.meals.get(meal)
    }

    /// Returns true if the user opted into the meal.
    pub fn is_opted_in(&self, meal: MealType) -> bool {
        self.meals.get(meal).opted_in
    }

    /// Returns true if the meal is opted in and reconfirmed.
    pub fn is_reconfirmed(&self, meal: MealType) -> bool {
        let selection = self.meals.get(meal);
        selection.opted_in && selection.reconfirmed
    }

    /// Sets the opt-in flag. Opting out also clears the reconfirmation.
    pub fn set_opt_in(&mut self, meal: MealType, desired: bool) {
        let selection = self.meals.get_mut(meal);
        selection.opted_in = desired;
        if !desired {
            selection.reconfirmed = false;
        }
    }

    /// Marks an opted-in meal as reconfirmed. Has no effect when not opted in.
    pub fn mark_reconfirmed(&mut self, meal: MealType) {
        let selection = self.meals.get_mut(meal);
        if selection.opted_in {
            selection.reconfirmed = true;
        }
    }

    /// Marks the day as work-from-home and opts out of every meal.
    pub fn enable_wfh(&mut self) {
        self.wfh = true;
        self.meals = MealSelections::default();
    }

    /// Clears the work-from-home flag. Meal flags are left untouched.
    pub fn disable_wfh(&mut self) {
        self.wfh = false;
    }

    /// Checks the record invariants: no reconfirmation without an opt-in, and
    /// no meals on a work-from-home day.
    pub fn is_consistent(&self) -> bool {
        let reconfirm_ok = self
            .meals
            .iter()
            .all(|(_, selection)| selection.opted_in || !selection.reconfirmed);
        let wfh_ok = !self.wfh || self.meals == MealSelections::default();
        reconfirm_ok && wfh_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    #[test]
    fn test_default_confirmation() {
        let confirmation = MealConfirmation::new("emp123", date());

        assert_eq!(confirmation.id(), "emp123-2024-05-06");
        assert!(!confirmation.wfh);
        for meal in MealType::ALL {
            assert!(!confirmation.is_opted_in(meal));
            assert!(!confirmation.is_reconfirmed(meal));
        }
    }

    #[test]
    fn test_opt_out_resets_reconfirmation() {
        let mut confirmation = MealConfirmation::new("emp123", date());
        confirmation.set_opt_in(MealType::Lunch, true);
        confirmation.mark_reconfirmed(MealType::Lunch);
        assert!(confirmation.is_reconfirmed(MealType::Lunch));

        confirmation.set_opt_in(MealType::Lunch, false);
        assert!(!confirmation.meal(MealType::Lunch).reconfirmed);
        assert!(confirmation.is_consistent());
    }

    #[test]
    fn test_reconfirm_requires_opt_in() {
        let mut confirmation = MealConfirmation::new("emp123", date());
        confirmation.mark_reconfirmed(MealType::Snacks);
        assert!(!confirmation.meal(MealType::Snacks).reconfirmed);
    }

    #[test]
    fn test_wfh_clears_meals_and_disable_keeps_them_cleared() {
        let mut confirmation = MealConfirmation::new("emp123", date());
        confirmation.set_opt_in(MealType::Breakfast, true);
        confirmation.set_opt_in(MealType::Lunch, true);

        confirmation.enable_wfh();
        assert!(confirmation.wfh);
        assert!(confirmation.is_consistent());

        confirmation.disable_wfh();
        assert!(!confirmation.wfh);
        assert!(!confirmation.is_opted_in(MealType::Breakfast));
        assert!(!confirmation.is_opted_in(MealType::Lunch));
    }

    #[test]
    fn test_serialization_shape() {
        let mut confirmation = MealConfirmation::new("emp123", date());
        confirmation.set_opt_in(MealType::Lunch, true);

        let value = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(value["userId"], "emp123");
        assert_eq!(value["date"], "2024-05-06");
        assert_eq!(value["meals"]["Lunch"]["optedIn"], true);

        let parsed: MealConfirmation =
            serde_json::from_value(serde_json::json!({"userId": "emp9", "date": "2024-05-06"}))
                .unwrap();
        assert_eq!(parsed, MealConfirmation::new("emp9", date()));
    }
}
