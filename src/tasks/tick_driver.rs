//! Once-per-second tick driver

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, trace};

use crate::services::Ticker;

/// Interval between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that delivers a tick to every subscriber once per second
pub async fn tick_driver_task(ticker: Arc<Ticker>) {
    info!("Starting tick driver task");

    let mut interval = interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        match ticker.tick() {
            Ok(delivered) => trace!("Tick delivered to {} subscribers", delivered),
            Err(e) => error!("Failed to deliver tick: {}", e),
        }
    }
}
