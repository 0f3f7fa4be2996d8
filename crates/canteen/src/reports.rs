//! Consolidated reports and the live dashboard feed.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use doc_store::{Collection, DocumentStore};
use entities::{ConsolidatedReport, DashboardUpdate, EmployeeConfirmationDetails, MealConfirmation};
use meal_policy::Clock;
use tracing::{debug, warn};

use crate::{
    CanteenResult, PickupEstimate, WatchHandle,
    aggregation::{consolidate, employee_details},
    records::{all_confirmations, all_users, parse_valid},
};

/// Derives reports from the confirmation collection.
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    pickup: PickupEstimate,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>, pickup: PickupEstimate) -> Self {
        Self {
            store,
            clock,
            pickup,
        }
    }

    /// Per-meal counts for a date.
    pub async fn get_consolidated_report(
        &self,
        date: NaiveDate,
    ) -> CanteenResult<Vec<ConsolidatedReport>> {
        let confirmations = all_confirmations(self.store.as_ref()).await?;
        Ok(consolidate(date, &confirmations, self.pickup))
    }

    /// Every employee joined with their confirmation for a date.
    pub async fn get_employee_details(
        &self,
        date: NaiveDate,
    ) -> CanteenResult<Vec<EmployeeConfirmationDetails>> {
        let confirmations = all_confirmations(self.store.as_ref()).await?;
        let users = all_users(self.store.as_ref()).await?;
        Ok(employee_details(date, &users, &confirmations))
    }

    /// Calls `callback` with a fresh dashboard now and after every change to
    /// the confirmation collection.
    ///
    /// Each update is recomputed from the full snapshot. Dropping the returned
    /// handle unsubscribes.
    pub async fn subscribe_to_report_updates<F>(&self, mut callback: F) -> CanteenResult<WatchHandle>
    where
        F: FnMut(DashboardUpdate) + Send + 'static,
    {
        let mut subscription = self.store.subscribe(Collection::Confirmations).await?;
        let service = self.clone();

        let task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                let confirmations: Vec<MealConfirmation> =
                    parse_valid(Collection::Confirmations, &snapshot.documents);

                match service.build_update(&confirmations).await {
                    Ok(update) => callback(update),
                    Err(e) => warn!(error = %e, "Failed to recompute dashboard"),
                }
            }
            debug!("Confirmation feed closed");
        });

        Ok(WatchHandle::new(task))
    }

    async fn build_update(&self, confirmations: &[MealConfirmation]) -> CanteenResult<DashboardUpdate> {
        let date = self.clock.today();
        let users = all_users(self.store.as_ref()).await?;

        Ok(DashboardUpdate {
            date,
            report: consolidate(date, confirmations, self.pickup),
            details: employee_details(date, &users, confirmations),
            generated_at: Utc::now(),
        })
    }
}
