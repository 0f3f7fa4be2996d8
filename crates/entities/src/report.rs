//! Derived report definitions for the canteen dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{MealConfirmation, MealType, User};

/// Consolidated counts for one meal on one date.
///
/// Always satisfies `picked_up <= reconfirmed <= confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedReport {
    /// Report date.
    pub date: NaiveDate,
    /// Meal slot.
    pub meal_type: MealType,
    /// Employees who opted in.
    pub confirmed: u32,
    /// Employees who opted in and reconfirmed.
    pub reconfirmed: u32,
    /// Estimated number of meals collected.
    pub picked_up: u32,
}

impl ConsolidatedReport {
    /// Meals not prepared thanks to the reconfirmation step.
    pub fn saved_by_reconfirmation(&self) -> u32 {
        self.confirmed.saturating_sub(self.reconfirmed)
    }

    /// Reconfirmed meals that were never collected.
    pub fn uncollected(&self) -> u32 {
        self.reconfirmed.saturating_sub(self.picked_up)
    }

    /// Returns true if the counts are monotonic.
    pub fn is_consistent(&self) -> bool {
        self.picked_up <= self.reconfirmed && self.reconfirmed <= self.confirmed
    }
}

/// An employee joined with their confirmation for the report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeConfirmationDetails {
    #[serde(flatten)]
    pub user: User,
    pub confirmation: MealConfirmation,
}

/// Everything the live dashboard renders, computed from one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpdate {
    /// Report date.
    pub date: NaiveDate,
    /// One entry per meal, in serving order.
    pub report: Vec<ConsolidatedReport>,
    /// One row per employee.
    pub details: Vec<EmployeeConfirmationDetails>,
    /// When this update was computed.
    pub generated_at: DateTime<Utc>,
}

/// A point of the historical waste series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteSample {
    /// Label of the day, e.g. `Day 1`.
    pub label: String,
    pub meal_type: MealType,
    pub confirmed: u32,
    pub reconfirmed: u32,
    pub picked_up: u32,
}
