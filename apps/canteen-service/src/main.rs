//! Canteen meal planner service binary.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use canteen::{Canteen, CanteenOptions, PickupEstimate};
use canteen_service::{
    ReminderService, ServiceConfig, TracingSink, dashboard, init_tracing, seed::seed_demo_data,
};
use doc_store::MemoryDocumentStore;
use meal_policy::{Clock, MealSchedule, SimulatedClock, SystemClock};
use tokio::{signal, sync::watch};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        simulated_hour = ?config.simulated_hour,
        sessions = config.session_users.len(),
        "Starting canteen service"
    );

    let clock: Arc<dyn Clock> = match config.simulated_hour {
        Some(hour) => Arc::new(SimulatedClock::new(hour)?),
        None => Arc::new(SystemClock),
    };
    let store = Arc::new(MemoryDocumentStore::new());
    let options = CanteenOptions {
        schedule: MealSchedule::standard(),
        pickup: PickupEstimate::new(config.pickup_ratio)?,
    };
    let canteen = Arc::new(Canteen::new(store.clone(), clock.clone(), options));

    if config.seed_demo_data {
        seed_demo_data(&canteen, store.as_ref()).await?;
    }

    // Live dashboard
    let dashboard_handle = dashboard::start(&canteen).await?;
    dashboard::log_waste_trend();

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Start reminder service
    let reminder_service = ReminderService::new(
        canteen.clone(),
        Arc::new(TracingSink),
        &config.session_users,
        Duration::from_secs(config.tick_interval_secs),
        shutdown_rx,
    );
    let reminder_handle = tokio::spawn(reminder_service.run());

    info!(hour = clock.hour(), "Canteen service ready");
    shutdown_signal().await;

    // Signal shutdown
    info!("Shutting down canteen service...");
    let _ = shutdown_tx.send(true);
    let _ = reminder_handle.await;
    dashboard_handle.unsubscribe();

    info!("Canteen service shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
