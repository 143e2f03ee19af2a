use chrono::Utc;

use astrapatch_core::models::catalog::UNTRACKED_SATELLITES;
use astrapatch_core::models::IssState;

use crate::board::Region;
use crate::dashboard::Dashboard;

pub const FALLBACK: &str = "Unable to load ISS telemetry.";

/// Satellite roster: a live ISS card followed by the untracked placeholders.
pub async fn load(dashboard: &Dashboard) -> Option<IssState> {
    let iss = match dashboard.client().iss_position().await {
        Ok(payload) => IssState::from_payload(payload, Utc::now()),
        Err(e) => {
            tracing::warn!("Failed to load satellite telemetry: {}", e);
            None
        }
    };
    dashboard
        .board()
        .replace(Region::Satellites, render_roster(iss.as_ref()));
    iss
}

pub fn render_roster(iss: Option<&IssState>) -> Vec<String> {
    let mut lines = vec![match iss {
        Some(state) => format!(
            "International Space Station: {:.4}°, {:.4}° | {:.2} km | {:.2} km/h | {}",
            state.latitude,
            state.longitude,
            state.altitude_km,
            state.velocity_kmh,
            state.visibility
        ),
        None => FALLBACK.to_string(),
    }];
    lines.extend(UNTRACKED_SATELLITES.iter().map(|sat| {
        format!(
            "{}: {} (live tracking data not available)",
            sat.name, sat.info
        )
    }));
    lines
}
