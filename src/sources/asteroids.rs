use astrapatch_core::models::{
    closest_approaches, flatten_feed, Asteroid, ASTEROID_WINDOW_DAYS, MAX_DISPLAYED_ASTEROIDS,
};

use super::leading_window;
use crate::board::Region;
use crate::dashboard::Dashboard;
use crate::render::group_thousands;

pub const EMPTY: &str = "No asteroids detected.";
pub const FALLBACK: &str = "Unable to load asteroid data.";

/// Near-Earth objects approaching in the coming week.
///
/// Returns the number of objects in the feed, not the number displayed.
pub async fn load(dashboard: &Dashboard) -> usize {
    let (start, end) = leading_window(dashboard.today(), ASTEROID_WINDOW_DAYS as u64);
    let board = dashboard.board();

    let feed = match dashboard.client().neo_feed(start, end).await {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!("Failed to load asteroids: {}", e);
            board.set_text(Region::Asteroids, FALLBACK);
            return 0;
        }
    };

    let asteroids = feed
        .near_earth_objects
        .map(flatten_feed)
        .unwrap_or_default();
    let total = asteroids.len();
    board.replace(Region::Asteroids, render_asteroids(asteroids));
    total
}

/// Header with the full count, then the earliest approaches.
///
/// Objects without close-approach data still take a display slot but are
/// not listed.
pub fn render_asteroids(asteroids: Vec<Asteroid>) -> Vec<String> {
    if asteroids.is_empty() {
        return vec![EMPTY.to_string()];
    }
    let mut lines = vec![format!("{} Asteroids Approaching", asteroids.len())];
    for asteroid in closest_approaches(asteroids, MAX_DISPLAYED_ASTEROIDS) {
        let Some(approach) = &asteroid.approach else {
            continue;
        };
        let date = approach
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "TBD".to_string());
        let mut line = format!(
            "{} | Approach: {} | Distance: {} km | Velocity: {} km/h",
            asteroid.name,
            date,
            group_thousands(approach.miss_distance_km),
            group_thousands(approach.velocity_kmh)
        );
        if asteroid.hazardous {
            line.push_str(" | POTENTIALLY HAZARDOUS");
        }
        lines.push(line);
    }
    lines
}
