use astrapatch_core::models::Spacewalk;

use crate::board::Region;
use crate::dashboard::Dashboard;
use crate::render::format_instant;

pub const EMPTY: &str = "No upcoming spacewalks scheduled.";
pub const FALLBACK: &str = "Unable to load spacewalk data.";

pub async fn load(dashboard: &Dashboard) -> usize {
    let board = dashboard.board();
    match dashboard.client().upcoming_spacewalks().await {
        Ok(response) => {
            let walks: Vec<Spacewalk> = response
                .results
                .unwrap_or_default()
                .into_iter()
                .map(Spacewalk::from_payload)
                .collect();
            board.replace(Region::Spacewalks, render_spacewalks(&walks));
            walks.len()
        }
        Err(e) => {
            tracing::warn!("Failed to load spacewalks: {}", e);
            board.set_text(Region::Spacewalks, FALLBACK);
            0
        }
    }
}

pub fn render_spacewalks(walks: &[Spacewalk]) -> Vec<String> {
    if walks.is_empty() {
        return vec![EMPTY.to_string()];
    }
    walks
        .iter()
        .map(|walk| {
            format!(
                "{} | {} | Crew: {} | Duration: {}",
                walk.title,
                format_instant(walk.start),
                walk.crew_label(),
                walk.duration
            )
        })
        .collect()
}
