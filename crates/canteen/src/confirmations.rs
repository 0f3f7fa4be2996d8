//! Meal confirmation service.
//!
//! Every mutation is an atomic read-modify-write: the record is read under a
//! per-record lock, the transition rule is applied, and the full merged record
//! is written back. A refused transition writes nothing.

use std::sync::Arc;

use chrono::NaiveDate;
use doc_store::{Collection, DocumentStore, to_fields};
use entities::{MealConfirmation, MealType};
use meal_policy::{Clock, MealSchedule, MealState, Phase};
use tracing::{debug, info};

use crate::{
    CanteenError, CanteenResult, KeyedLocks,
    state_machine::{self, Transition},
};

/// Reads and changes per-user-per-day meal confirmations.
pub struct ConfirmationService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    schedule: MealSchedule,
    locks: KeyedLocks,
}

impl ConfirmationService {
    /// Creates a new confirmation service.
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>, schedule: MealSchedule) -> Self {
        Self {
            store,
            clock,
            schedule,
            locks: KeyedLocks::default(),
        }
    }

    /// Phase of a meal on `date` at the current time.
    pub fn phase(&self, date: NaiveDate, meal: MealType) -> Phase {
        self.schedule
            .phase_on(self.clock.today(), self.clock.hour(), date, meal)
    }

    /// Returns the confirmation for a user and date, defaulted if absent.
    pub async fn get_confirmation(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> CanteenResult<MealConfirmation> {
        Ok(self
            .load(user_id, date)
            .await?
            .unwrap_or_else(|| MealConfirmation::new(user_id, date)))
    }

    /// Returns today's confirmation for a user.
    pub async fn today_confirmation(&self, user_id: &str) -> CanteenResult<MealConfirmation> {
        self.get_confirmation(user_id, self.clock.today()).await
    }

    /// Returns tomorrow's confirmation for a user.
    pub async fn tomorrow_confirmation(&self, user_id: &str) -> CanteenResult<MealConfirmation> {
        self.get_confirmation(user_id, self.clock.tomorrow()).await
    }

    /// Returns the state of one meal.
    pub async fn meal_state(
        &self,
        user_id: &str,
        date: NaiveDate,
        meal: MealType,
    ) -> CanteenResult<MealState> {
        let record = self.load(user_id, date).await?;
        Ok(MealState::derive(record.as_ref(), meal, self.phase(date, meal)))
    }

    /// Opts a meal in or out.
    pub async fn set_meal_opt_in(
        &self,
        user_id: &str,
        date: NaiveDate,
        meal: MealType,
        desired: bool,
    ) -> CanteenResult<MealConfirmation> {
        let phase = self.phase(date, meal);
        let action = if desired { "opt in" } else { "opt out" };

        self.update(user_id, date, action, |record| {
            state_machine::apply_opt_change(record, meal, desired, phase)
                .map_err(|reason| CanteenError::not_permitted(meal, reason))
        })
        .await
    }

    /// Reconfirms an opted-in meal during its window.
    pub async fn reconfirm_meal(
        &self,
        user_id: &str,
        date: NaiveDate,
        meal: MealType,
    ) -> CanteenResult<MealConfirmation> {
        let phase = self.phase(date, meal);

        self.update(user_id, date, "reconfirm", |record| {
            state_machine::apply_reconfirm(record, meal, phase)
                .map_err(|reason| CanteenError::not_permitted(meal, reason))
        })
        .await
    }

    /// Sets the work-from-home flag for a date.
    pub async fn set_wfh(
        &self,
        user_id: &str,
        date: NaiveDate,
        desired: bool,
    ) -> CanteenResult<MealConfirmation> {
        let action = if desired { "enable wfh" } else { "disable wfh" };

        self.update(user_id, date, action, |record| {
            Ok(state_machine::apply_wfh(record, desired))
        })
        .await
    }

    /// Sets the work-from-home flag for tomorrow.
    pub async fn set_wfh_for_tomorrow(
        &self,
        user_id: &str,
        desired: bool,
    ) -> CanteenResult<MealConfirmation> {
        self.set_wfh(user_id, self.clock.tomorrow(), desired).await
    }

    async fn load(&self, user_id: &str, date: NaiveDate) -> CanteenResult<Option<MealConfirmation>> {
        let id = MealConfirmation::record_id(user_id, date);
        match self.store.get(Collection::Confirmations, &id).await? {
            Some(doc) => Ok(Some(doc.parse()?)),
            None => Ok(None),
        }
    }

    async fn update<F>(
        &self,
        user_id: &str,
        date: NaiveDate,
        action: &'static str,
        change: F,
    ) -> CanteenResult<MealConfirmation>
    where
        F: FnOnce(&mut MealConfirmation) -> CanteenResult<Transition>,
    {
        let id = MealConfirmation::record_id(user_id, date);
        let _guard = self.locks.lock(&id).await;

        let mut record = self
            .load(user_id, date)
            .await?
            .unwrap_or_else(|| MealConfirmation::new(user_id, date));

        match change(&mut record) {
            Ok(Transition::Unchanged) => {
                debug!(user_id, %date, action, "Confirmation already up to date");
                Ok(record)
            }
            Ok(Transition::Changed) => {
                let fields = to_fields(&id, &record)?;
                let stored = self
                    .store
                    .upsert(Collection::Confirmations, &id, fields)
                    .await?;
                info!(user_id, %date, action, "Confirmation updated");
                Ok(stored.parse()?)
            }
            Err(e) => {
                debug!(user_id, %date, action, error = %e, "Confirmation change rejected");
                Err(e)
            }
        }
    }
}
