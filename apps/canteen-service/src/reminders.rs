//! Reminder ticker for active sessions

use std::{collections::HashMap, sync::Arc, time::Duration};

use canteen::Canteen;
use meal_policy::{Clock, ReminderTracker};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::sink::ReminderSink;

/// Periodically evaluates reminders for each session user.
pub struct ReminderService {
    /// Canteen services
    canteen: Arc<Canteen>,
    /// Where reminders go
    sink: Arc<dyn ReminderSink>,
    /// One tracker per session user
    trackers: HashMap<String, ReminderTracker>,
    /// Tick interval
    interval: Duration,
    /// Shutdown signal receiver
    shutdown_rx: watch::Receiver<bool>,
}

impl ReminderService {
    /// Create a new reminder service
    pub fn new(
        canteen: Arc<Canteen>,
        sink: Arc<dyn ReminderSink>,
        session_users: &[String],
        interval: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let schedule = canteen.schedule().clone();
        let trackers = session_users
            .iter()
            .map(|id| (id.clone(), ReminderTracker::new(schedule.clone())))
            .collect();

        Self {
            canteen,
            sink,
            trackers,
            interval,
            shutdown_rx,
        }
    }

    /// Run the reminder service
    pub async fn run(mut self) {
        info!(
            sessions = self.trackers.len(),
            interval_secs = self.interval.as_secs(),
            "Starting reminder service"
        );

        let mut interval_timer = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = interval_timer.tick() => {
                    self.tick().await;
                }

                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("Reminder service shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Evaluates every session once. Returns the number of reminders sent.
    pub async fn tick(&mut self) -> usize {
        let clock = self.canteen.clock();
        let hour = clock.hour();

        match self.canteen.schedule().time_until_cutoff(clock.now().time()) {
            Some(left) => debug!(
                hour,
                minutes_left = left.num_minutes(),
                "Time until meal cutoff"
            ),
            None => debug!(hour, "Meal choices are locked for today"),
        }

        let mut sent = 0;
        for (user_id, tracker) in self.trackers.iter_mut() {
            let confirmation = match self.canteen.confirmations().today_confirmation(user_id).await {
                Ok(confirmation) => confirmation,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "Failed to load confirmation for reminders");
                    continue;
                }
            };

            for reminder in tracker.observe(hour, &confirmation) {
                self.sink.deliver(user_id, &reminder).await;
                sent += 1;
            }
        }
        sent
    }
}
