//! Canteen meal planner service
//!
//! Hosts the canteen services in a single process over the in-memory
//! document store: demo data, a live dashboard log and per-session reminders.

pub mod config;
pub mod dashboard;
pub mod reminders;
pub mod seed;
pub mod sink;

pub use config::ServiceConfig;
pub use reminders::ReminderService;
pub use sink::{ReminderSink, TracingSink};

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
