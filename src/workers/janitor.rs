use std::time::Duration;

use tracing::{debug, info};

use crate::modules::playback::service::PlaybackService;
use crate::modules::subscription::checkout::CHECKOUT_TTL;
use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// One pass over the in-memory state: idle watch sessions are torn down
/// and abandoned checkouts forgotten.
pub async fn sweep(state: &AppState) -> (usize, usize) {
    let sessions = PlaybackService::evict_idle(state).await;
    let checkouts = state.subscriptions.evict_stale_checkouts(CHECKOUT_TTL).await;
    debug!(sessions, checkouts, "Janitor sweep finished");
    (sessions, checkouts)
}

pub async fn start_janitor(state: AppState) {
    info!("Starting janitor worker...");

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        sweep(&state).await;
    }
}
