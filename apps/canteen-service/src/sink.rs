//! Reminder delivery.

use async_trait::async_trait;
use meal_policy::Reminder;
use tracing::info;

/// Delivers reminders to a user's session.
#[async_trait]
pub trait ReminderSink: Send + Sync {
    /// Shows a reminder to a user.
    async fn deliver(&self, user_id: &str, reminder: &Reminder);
}

/// Sink that writes reminders to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl ReminderSink for TracingSink {
    async fn deliver(&self, user_id: &str, reminder: &Reminder) {
        info!(
            user_id = %user_id,
            title = %reminder.title(),
            body = %reminder.body(),
            "Reminder"
        );
    }
}
