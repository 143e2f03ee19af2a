//! ISS position.
//!
//! The first fetch runs as a load task; afterwards the poller calls
//! [`refresh`] on every tick. A failed poll leaves the last good position
//! on the board.

use chrono::Utc;

use astrapatch_core::models::IssState;

use crate::board::{Board, Region};
use crate::client::SpaceClient;
use crate::dashboard::Dashboard;
use crate::live::IssTracker;

pub const FALLBACK: &str = "Unable to load ISS position.";

/// Initial fetch, then start polling whatever the outcome.
pub async fn load(dashboard: &Dashboard) -> Option<IssState> {
    let state = refresh(dashboard.client(), dashboard.board(), dashboard.iss()).await;
    dashboard.start_iss_poller();
    state
}

/// Fetch once and update the board.
///
/// Returns the fresh state, or `None` when this poll failed.
pub async fn refresh(client: &SpaceClient, board: &Board, tracker: &IssTracker) -> Option<IssState> {
    let fetched = match client.iss_position().await {
        Ok(payload) => IssState::from_payload(payload, Utc::now()),
        Err(e) => {
            tracing::warn!("Failed to fetch ISS position: {}", e);
            None
        }
    };

    match fetched {
        Some(state) => {
            tracing::debug!(lat = state.latitude, lon = state.longitude, "iss position");
            board.replace(Region::IssPosition, render_position(&state));
            board.set_text(Region::IssLocation, state.location_line());
            tracker.update(state.clone());
            Some(state)
        }
        None => {
            if tracker.current().is_none() {
                board.set_text(Region::IssPosition, FALLBACK);
            }
            None
        }
    }
}

pub fn render_position(state: &IssState) -> Vec<String> {
    vec![
        format!("Latitude: {:.4}°", state.latitude),
        format!("Longitude: {:.4}°", state.longitude),
        format!("Altitude: {:.2} km", state.altitude_km),
        format!("Velocity: {:.2} km/h", state.velocity_kmh),
    ]
}
