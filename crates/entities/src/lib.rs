//! Core entity definitions for the canteen meal planner.
//!
//! This crate defines the data types shared across the workspace: users and
//! their roles, the weekly menu, per-employee meal confirmations, and the
//! derived reports shown on the canteen dashboard.

mod confirmation;
mod meal;
mod menu;
mod report;
mod user;

pub use confirmation::*;
pub use meal::*;
pub use menu::*;
pub use report::*;
pub use user::*;
