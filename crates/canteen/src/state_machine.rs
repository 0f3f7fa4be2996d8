//! Transition rules for a single confirmation record.
//!
//! Each rule either applies the change to the record in place and reports
//! whether anything changed, or refuses it with a [`Rejection`] and leaves
//! the record untouched. Persisting the result is the caller's job.

use entities::{MealConfirmation, MealType};
use meal_policy::Phase;

use crate::Rejection;

/// Outcome of an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The record changed and must be written.
    Changed,
    /// The record already had the requested value.
    Unchanged,
}

impl Transition {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Transition::Changed
        } else {
            Transition::Unchanged
        }
    }
}

/// Opts a meal in or out.
pub fn apply_opt_change(
    record: &mut MealConfirmation,
    meal: MealType,
    desired: bool,
    phase: Phase,
) -> Result<Transition, Rejection> {
    if !phase.allows_opt_change() {
        return Err(Rejection::Locked);
    }
    if record.is_reconfirmed(meal) {
        return Err(Rejection::AlreadyReconfirmed);
    }
    if desired && record.wfh {
        return Err(Rejection::WorkingFromHome);
    }
    if record.is_opted_in(meal) == desired {
        return Ok(Transition::Unchanged);
    }

    record.set_opt_in(meal, desired);
    Ok(Transition::Changed)
}

/// Reconfirms an opted-in meal. Repeating it is a no-op.
pub fn apply_reconfirm(
    record: &mut MealConfirmation,
    meal: MealType,
    phase: Phase,
) -> Result<Transition, Rejection> {
    match phase {
        Phase::Locked => return Err(Rejection::Locked),
        Phase::Open => return Err(Rejection::OutsideReconfirmWindow),
        Phase::ReconfirmWindow => {}
    }
    if record.is_reconfirmed(meal) {
        return Ok(Transition::Unchanged);
    }
    if !record.is_opted_in(meal) {
        return Err(Rejection::NotOptedIn);
    }

    record.mark_reconfirmed(meal);
    Ok(Transition::Changed)
}

/// Sets or clears the work-from-home flag.
///
/// Enabling opts out of every meal. Disabling only clears the flag; meals
/// stay opted out until chosen again.
pub fn apply_wfh(record: &mut MealConfirmation, desired: bool) -> Transition {
    if desired {
        let before = record.clone();
        record.enable_wfh();
        Transition::from_changed(*record != before)
    } else {
        let changed = record.wfh;
        record.disable_wfh();
        Transition::from_changed(changed)
    }
}
