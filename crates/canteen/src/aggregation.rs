//! Consolidated meal counts and per-employee details.
//!
//! Both views are recomputed from the full record set on every call; nothing
//! is patched incrementally.

use chrono::NaiveDate;
use entities::{
    ConsolidatedReport, EmployeeConfirmationDetails, MealConfirmation, MealType, User,
};

use crate::{CanteenError, CanteenResult};

/// Default share of reconfirmed meals assumed to be picked up.
pub const DEFAULT_PICKUP_RATIO: f64 = 0.97;

/// Lowest accepted pickup ratio.
pub const MIN_PICKUP_RATIO: f64 = 0.95;

/// Estimates how many reconfirmed meals are actually collected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupEstimate {
    ratio: f64,
}

impl Default for PickupEstimate {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_PICKUP_RATIO,
        }
    }
}

impl PickupEstimate {
    /// Creates an estimate with a ratio in `[0.95, 1.0]`.
    pub fn new(ratio: f64) -> CanteenResult<Self> {
        if !(MIN_PICKUP_RATIO..=1.0).contains(&ratio) {
            return Err(CanteenError::invalid_input(format!(
                "pickup ratio {ratio} is outside [{MIN_PICKUP_RATIO}, 1.0]"
            )));
        }
        Ok(Self { ratio })
    }

    /// `floor(reconfirmed * ratio)`, never above `reconfirmed`.
    pub fn picked_up(&self, reconfirmed: u32) -> u32 {
        let estimate = (f64::from(reconfirmed) * self.ratio).floor() as u32;
        estimate.min(reconfirmed)
    }
}

/// Builds one report per meal from the records dated `date`.
///
/// An empty record set yields zero counts.
pub fn consolidate(
    date: NaiveDate,
    confirmations: &[MealConfirmation],
    pickup: PickupEstimate,
) -> Vec<ConsolidatedReport> {
    let todays: Vec<&MealConfirmation> = confirmations.iter().filter(|c| c.date == date).collect();

    MealType::ALL
        .into_iter()
        .map(|meal| {
            let confirmed = todays.iter().filter(|c| c.is_opted_in(meal)).count() as u32;
            let reconfirmed = todays.iter().filter(|c| c.is_reconfirmed(meal)).count() as u32;
            ConsolidatedReport {
                date,
                meal_type: meal,
                confirmed,
                reconfirmed,
                picked_up: pickup.picked_up(reconfirmed),
            }
        })
        .collect()
}

/// Joins every employee with their record for `date`.
///
/// Employees without a record get the all-false default. Admin accounts are
/// left out.
pub fn employee_details(
    date: NaiveDate,
    users: &[User],
    confirmations: &[MealConfirmation],
) -> Vec<EmployeeConfirmationDetails> {
    users
        .iter()
        .filter(|user| user.is_employee())
        .map(|user| {
            let confirmation = confirmations
                .iter()
                .find(|c| c.date == date && c.user_id == user.id)
                .cloned()
                .unwrap_or_else(|| MealConfirmation::new(user.id.clone(), date));
            EmployeeConfirmationDetails {
                user: user.clone(),
                confirmation,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use entities::UserRole;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn employee(id: &str) -> User {
        User::new(id, format!("Test {id}"), format!("{id}@karmic.com"), UserRole::Employee)
    }

    #[test]
    fn test_two_opt_in_one_reconfirms_snacks() {
        let mut a = MealConfirmation::new("emp1", date());
        a.set_opt_in(MealType::Snacks, true);
        a.mark_reconfirmed(MealType::Snacks);
        let mut b = MealConfirmation::new("emp2", date());
        b.set_opt_in(MealType::Snacks, true);
        let c = MealConfirmation::new("emp3", date());

        let report = consolidate(date(), &[a, b, c], PickupEstimate::default());
        let snacks = report
            .iter()
            .find(|r| r.meal_type == MealType::Snacks)
            .unwrap();

        assert_eq!(snacks.confirmed, 2);
        assert_eq!(snacks.reconfirmed, 1);
        assert!(snacks.picked_up <= 1);
    }

    #[test]
    fn test_empty_set_reports_zeros() {
        let report = consolidate(date(), &[], PickupEstimate::default());
        assert_eq!(report.len(), 3);
        assert!(report
            .iter()
            .all(|r| r.confirmed == 0 && r.reconfirmed == 0 && r.picked_up == 0));
    }

    #[test]
    fn test_other_dates_are_ignored() {
        let mut yesterday = MealConfirmation::new("emp1", date().pred_opt().unwrap());
        yesterday.set_opt_in(MealType::Lunch, true);

        let report = consolidate(date(), &[yesterday], PickupEstimate::default());
        assert!(report.iter().all(|r| r.confirmed == 0));
    }

    #[test]
    fn test_counts_are_monotonic() {
        let confirmations: Vec<_> = (0..40)
            .map(|i| {
                let mut c = MealConfirmation::new(format!("emp{i}"), date());
                for (n, meal) in MealType::ALL.into_iter().enumerate() {
                    if (i + n) % 3 != 0 {
                        c.set_opt_in(meal, true);
                    }
                    if (i * (n + 1)) % 4 == 0 {
                        c.mark_reconfirmed(meal);
                    }
                }
                c
            })
            .collect();

        for ratio in [0.95, 0.97, 1.0] {
            let pickup = PickupEstimate::new(ratio).unwrap();
            for report in consolidate(date(), &confirmations, pickup) {
                assert!(report.is_consistent(), "{report:?}");
            }
        }
    }

    #[test]
    fn test_pickup_ratio_bounds() {
        assert!(PickupEstimate::new(0.9).is_err());
        assert!(PickupEstimate::new(1.01).is_err());

        let pickup = PickupEstimate::new(1.0).unwrap();
        assert_eq!(pickup.picked_up(10), 10);
        assert_eq!(PickupEstimate::default().picked_up(100), 97);
    }

    #[test]
    fn test_details_default_missing_records() {
        let admin = User::new("adm1", "Casey Jordan", "casey.jordan@canteen.karmic.com", UserRole::Admin);
        let users = vec![employee("emp1"), employee("emp2"), admin];

        let mut record = MealConfirmation::new("emp1", date());
        record.set_opt_in(MealType::Breakfast, true);

        let details = employee_details(date(), &users, &[record.clone()]);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].confirmation, record);
        assert_eq!(details[1].confirmation, MealConfirmation::new("emp2", date()));
    }
}
