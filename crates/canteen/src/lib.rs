//! Canteen meal planner services.
//!
//! This crate holds the behaviour of the meal planner on top of a
//! [`DocumentStore`]:
//!
//! - [`ConfirmationService`]: the per-meal confirmation state machine
//! - [`ReportService`]: consolidated counts, employee details, live updates
//! - [`MenuService`]: weekly menu templates
//! - [`UserDirectory`]: user accounts
//!
//! All services share one store and one [`Clock`]; [`Canteen`] wires them up.

mod aggregation;
mod analytics;
mod confirmations;
mod error;
mod locks;
mod menus;
mod records;
mod reports;
pub mod state_machine;
mod users;
mod watch;

use std::sync::Arc;

pub use aggregation::*;
pub use analytics::*;
pub use confirmations::*;
use doc_store::DocumentStore;
pub use error::*;
pub(crate) use locks::KeyedLocks;
use meal_policy::{Clock, MealSchedule};
pub use menus::*;
pub use reports::*;
pub use users::*;
pub use watch::*;

/// Tunables shared by the services.
#[derive(Debug, Clone, Default)]
pub struct CanteenOptions {
    /// Time rules.
    pub schedule: MealSchedule,
    /// Pickup estimate used in reports.
    pub pickup: PickupEstimate,
}

/// All canteen services over one store and clock.
pub struct Canteen {
    clock: Arc<dyn Clock>,
    schedule: MealSchedule,
    confirmations: ConfirmationService,
    reports: ReportService,
    menus: MenuService,
    users: UserDirectory,
}

impl Canteen {
    /// Creates the services.
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>, options: CanteenOptions) -> Self {
        Self {
            confirmations: ConfirmationService::new(
                store.clone(),
                clock.clone(),
                options.schedule.clone(),
            ),
            reports: ReportService::new(store.clone(), clock.clone(), options.pickup),
            menus: MenuService::new(store.clone(), clock.clone()),
            users: UserDirectory::new(store),
            schedule: options.schedule,
            clock,
        }
    }

    /// Clock driving the time rules.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Time rules in force.
    pub fn schedule(&self) -> &MealSchedule {
        &self.schedule
    }

    /// Confirmation service.
    pub fn confirmations(&self) -> &ConfirmationService {
        &self.confirmations
    }

    /// Report service.
    pub fn reports(&self) -> &ReportService {
        &self.reports
    }

    /// Menu service.
    pub fn menus(&self) -> &MenuService {
        &self.menus
    }

    /// User directory.
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }
}
