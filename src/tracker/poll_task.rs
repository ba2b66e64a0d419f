use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, instrument};

use super::service::TrackerService;

/// Runs the periodic polling loop. One tick completes before the next one
/// starts, so ticks never overlap; a tick that overruns the interval simply
/// delays the next one, which is equivalent to the data arriving late.
#[instrument(skip(service))]
pub async fn start_poll_task(service: Arc<TrackerService>, check_interval: Duration) {
    info!(
        check_interval_secs = check_interval.as_secs(),
        players = service.roster().len(),
        "Starting match poll background task"
    );

    let mut tick_interval = interval(check_interval);

    loop {
        tick_interval.tick().await;

        let summary = service.run_tick().await;
        debug!(
            players_checked = summary.players_checked,
            snapshots_received = summary.snapshots_received,
            starts = summary.starts,
            ends = summary.ends,
            alerts = summary.alerts,
            "Poll tick completed"
        );
    }
}
