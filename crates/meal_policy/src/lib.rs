//! Time policy for meal confirmations.
//!
//! Everything here is a pure function of the current hour: the lifecycle
//! phase of a meal, the state of a user's meal, the time left before the
//! daily cutoff, and the reminders a session should see. The current hour
//! comes from a [`Clock`], so tests and demos can drive the policy with a
//! simulated time.

mod clock;
mod phase;
mod reminder;
mod schedule;
mod state;

pub use clock::*;
pub use phase::*;
pub use reminder::*;
pub use schedule::*;
pub use state::*;
