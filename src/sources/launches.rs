use chrono::Utc;

use astrapatch_core::models::{select_launches, LaunchRecord};
use astrapatch_core::Countdown;

use crate::board::Region;
use crate::config::ALL_PROVIDERS;
use crate::dashboard::Dashboard;
use crate::live::CountdownBinding;
use crate::render::format_instant;

pub const FALLBACK: &str = "Unable to load launch data. Please check your connection.";

/// Load upcoming launches and start their countdowns.
///
/// Returns the number of launch cards written.
pub async fn load(dashboard: &Dashboard) -> usize {
    let board = dashboard.board();
    let response = match dashboard.client().upcoming_launches().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to load launches: {}", e);
            board.set_text(Region::Launches, FALLBACK);
            return 0;
        }
    };

    let count = response.count.unwrap_or(0);
    let provider = dashboard.config().launch_provider.as_str();
    let launches = filter_by_provider(
        select_launches(
            response.results.unwrap_or_default(),
            dashboard.config().launch_display_limit,
        ),
        provider,
    );
    tracing::info!(count, shown = launches.len(), provider, "launches loaded");

    board.set_text(Region::LaunchCount, count.to_string());
    if launches.is_empty() && provider != ALL_PROVIDERS {
        board.set_text(Region::Launches, format!("No upcoming launches for \"{}\".", provider));
    } else {
        board.replace(Region::Launches, render_launches(&launches));
    }

    dashboard.countdowns().replace(countdown_bindings(&launches));
    board.replace(Region::Countdowns, dashboard.countdowns().render(Utc::now()));
    dashboard.start_countdown_ticker();

    launches.len()
}

/// Keep the launches whose provider matches `provider`.
///
/// Applied to the displayed cards, after the display limit.
pub fn filter_by_provider(launches: Vec<LaunchRecord>, provider: &str) -> Vec<LaunchRecord> {
    launches
        .into_iter()
        .filter(|launch| launch.matches_provider(provider))
        .collect()
}

/// One countdown per launch with a parseable launch time.
pub fn countdown_bindings(launches: &[LaunchRecord]) -> Vec<CountdownBinding> {
    launches
        .iter()
        .filter_map(|launch| {
            launch.launch_time.map(|target| CountdownBinding {
                label: launch.name.clone(),
                countdown: Countdown::at(target),
            })
        })
        .collect()
}

pub fn render_launches(launches: &[LaunchRecord]) -> Vec<String> {
    launches.iter().map(render_launch).collect()
}

/// `[GO|Go] Falcon 9 | Starlink 6-1 (SpaceX) | Mission: ... | ...`
///
/// The badge pairs the status class with the upstream abbreviation.
pub fn render_launch(launch: &LaunchRecord) -> String {
    format!(
        "[{}|{}] {} ({}) | Mission: {} | Rocket: {} | Location: {} | Probability: {} | NET: {}",
        launch.status_class.as_str().to_uppercase(),
        launch.status_abbrev,
        launch.name,
        launch.provider,
        launch.mission,
        launch.rocket,
        launch.location,
        launch.probability_label(),
        format_instant(launch.launch_time),
    )
}
