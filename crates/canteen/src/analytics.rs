//! Illustrative waste trend.

use entities::{MealType, WasteSample};

/// Share of confirmed meals assumed to be reconfirmed in the trend.
const RECONFIRM_SHARE: f64 = 0.9;

/// `(confirmed, picked up)` per day.
const LUNCH_HISTORY: [(u32, u32); 5] = [(150, 142), (145, 140), (160, 155), (152, 148), (155, 145)];

/// Five days of lunch counts for the waste chart.
///
/// Reconfirmed is 90% of confirmed, raised where needed so that picked up
/// never exceeds it.
pub fn waste_analytics() -> Vec<WasteSample> {
    LUNCH_HISTORY
        .iter()
        .enumerate()
        .map(|(day, &(confirmed, picked_up))| {
            let share = (f64::from(confirmed) * RECONFIRM_SHARE).floor() as u32;
            let reconfirmed = share.max(picked_up).min(confirmed);
            WasteSample {
                label: format!("Day {}", day + 1),
                meal_type: MealType::Lunch,
                confirmed,
                reconfirmed,
                picked_up: picked_up.min(reconfirmed),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waste_series() {
        let series = waste_analytics();

        assert_eq!(series.len(), 5);
        assert_eq!(series[0].label, "Day 1");
        assert_eq!(series[2].confirmed, 160);
        assert_eq!(series[4].picked_up, 145);
        for sample in &series {
            assert_eq!(sample.meal_type, MealType::Lunch);
            assert!(sample.picked_up <= sample.reconfirmed);
            assert!(sample.reconfirmed <= sample.confirmed);
        }
    }

    #[test]
    fn test_series_is_deterministic() {
        assert_eq!(waste_analytics(), waste_analytics());
    }
}
