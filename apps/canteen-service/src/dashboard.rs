//! Live dashboard logger

use canteen::{Canteen, CanteenResult, WatchHandle};
use entities::DashboardUpdate;
use tracing::info;

/// Logs a dashboard update, one line per meal.
pub fn log_update(update: &DashboardUpdate) {
    let wfh = update
        .details
        .iter()
        .filter(|d| d.confirmation.wfh)
        .count();

    info!(
        date = %update.date,
        employees = update.details.len(),
        wfh,
        "Dashboard updated"
    );

    for report in &update.report {
        info!(
            meal = %report.meal_type,
            confirmed = report.confirmed,
            reconfirmed = report.reconfirmed,
            picked_up = report.picked_up,
            saved = report.saved_by_reconfirmation(),
            uncollected = report.uncollected(),
            "Meal counts"
        );
    }
}

/// Starts logging every dashboard update. Dropping the handle stops it.
pub async fn start(canteen: &Canteen) -> CanteenResult<WatchHandle> {
    canteen
        .reports()
        .subscribe_to_report_updates(|update| log_update(&update))
        .await
}

/// Logs the illustrative waste trend once.
pub fn log_waste_trend() {
    for sample in canteen::waste_analytics() {
        info!(
            day = %sample.label,
            meal = %sample.meal_type,
            confirmed = sample.confirmed,
            reconfirmed = sample.reconfirmed,
            picked_up = sample.picked_up,
            "Waste trend"
        );
    }
}
