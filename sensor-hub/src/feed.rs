use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;

use common::SensorEvent;

use crate::hub::SensorHub;

/// Publishes `events` on the hub one by one, `period` apart, in a background task.
///
/// Useful to replay recorded readings. The task ends after the last event.
/// Returns a `tokio::task::JoinHandle` resolving to the number of events that reached
/// at least one listener.
pub fn run_feed(
    hub: Arc<SensorHub>,
    events: Vec<SensorEvent>,
    period: Duration,
) -> tokio::task::JoinHandle<usize> {
    tokio::spawn(async move {
        info!("Feeding {} events every {:?}", events.len(), period);
        let mut interval = tokio::time::interval(period);
        let mut delivered = 0;

        for event in events {
            interval.tick().await;
            let hub = hub.clone();
            match tokio::task::spawn_blocking(move || hub.publish(event)).await {
                Ok(0) => debug!("Event dropped, no listener registered"),
                Ok(_) => delivered += 1,
                Err(e) => error!("Error publishing event: {:?}", e),
            }
        }
        delivered
    })
}
