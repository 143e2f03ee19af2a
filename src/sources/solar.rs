//! Space weather from DONKI: flares, coronal mass ejections and storms.
//!
//! The three feeds are fetched concurrently and fail independently. Each one
//! reports its full event count even though only the first few entries are
//! displayed; the counts are summed into the active events figure.

use chrono::NaiveDate;

use astrapatch_core::models::{
    CmePayload, CoronalMassEjection, FlarePayload, GeomagneticStorm, SolarEventCounts,
    SolarFlare, SolarKind, StormPayload, MAX_DISPLAYED_SOLAR_EVENTS, SOLAR_WINDOW_DAYS,
};

use super::trailing_window;
use crate::board::{Board, Region};
use crate::client::SpaceClient;
use crate::dashboard::Dashboard;
use crate::render::format_instant;

pub const FLARES_FALLBACK: &str = "Unable to load solar flare data.";
pub const CMES_FALLBACK: &str = "Unable to load CME data.";
pub const STORMS_FALLBACK: &str = "Unable to load storm data.";

const NO_FLARES: [&str; 2] = [
    "No recent solar flare activity detected.",
    "The sun is currently calm.",
];
const NO_CMES: &str = "No recent CME activity detected.";
const NO_STORMS: &str = "No recent geomagnetic storm activity.";

/// Load all three feeds over the trailing window and publish the total.
pub async fn load(dashboard: &Dashboard) -> SolarEventCounts {
    let (start, end) = trailing_window(dashboard.today(), SOLAR_WINDOW_DAYS as u64);
    let client = dashboard.client();
    let board = dashboard.board();

    let (flares, cmes, storms) = tokio::join!(
        load_flares(client, board, start, end),
        load_cmes(client, board, start, end),
        load_storms(client, board, start, end),
    );
    let counts = SolarEventCounts {
        flares,
        cmes,
        storms,
    };

    tracing::info!(
        flares = counts.flares,
        cmes = counts.cmes,
        storms = counts.storms,
        "solar events loaded"
    );
    board.set_text(Region::ActiveEvents, counts.total().to_string());
    counts
}

async fn fetch<T: serde::de::DeserializeOwned>(
    client: &SpaceClient,
    kind: SolarKind,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<Vec<T>> {
    match client.donki::<T>(kind, start, end).await {
        Ok(events) => Some(events),
        Err(e) => {
            tracing::warn!(feed = kind.endpoint(), "Failed to load {} data: {}", kind.label(), e);
            None
        }
    }
}

pub async fn load_flares(
    client: &SpaceClient,
    board: &Board,
    start: NaiveDate,
    end: NaiveDate,
) -> usize {
    match fetch::<FlarePayload>(client, SolarKind::Flares, start, end).await {
        Some(events) => {
            let flares: Vec<SolarFlare> = events.into_iter().map(SolarFlare::from_payload).collect();
            board.replace(Region::SolarFlares, render_flares(&flares));
            flares.len()
        }
        None => {
            board.set_text(Region::SolarFlares, FLARES_FALLBACK);
            0
        }
    }
}

pub async fn load_cmes(
    client: &SpaceClient,
    board: &Board,
    start: NaiveDate,
    end: NaiveDate,
) -> usize {
    match fetch::<CmePayload>(client, SolarKind::CoronalMassEjections, start, end).await {
        Some(events) => {
            let cmes: Vec<CoronalMassEjection> = events
                .into_iter()
                .map(CoronalMassEjection::from_payload)
                .collect();
            board.replace(Region::CmeEvents, render_cmes(&cmes));
            cmes.len()
        }
        None => {
            board.set_text(Region::CmeEvents, CMES_FALLBACK);
            0
        }
    }
}

pub async fn load_storms(
    client: &SpaceClient,
    board: &Board,
    start: NaiveDate,
    end: NaiveDate,
) -> usize {
    match fetch::<StormPayload>(client, SolarKind::GeomagneticStorms, start, end).await {
        Some(events) => {
            let storms: Vec<GeomagneticStorm> = events
                .into_iter()
                .map(GeomagneticStorm::from_payload)
                .collect();
            board.replace(Region::GeoStorms, render_storms(&storms));
            storms.len()
        }
        None => {
            board.set_text(Region::GeoStorms, STORMS_FALLBACK);
            0
        }
    }
}

pub fn render_flares(flares: &[SolarFlare]) -> Vec<String> {
    if flares.is_empty() {
        return NO_FLARES.iter().map(|line| line.to_string()).collect();
    }
    let mut lines = vec![format!("{} Recent Flares", flares.len())];
    lines.extend(flares.iter().take(MAX_DISPLAYED_SOLAR_EVENTS).map(|flare| {
        format!(
            "Class {} Flare | {} | Source: {} | Peak: {}",
            flare.class_type,
            format_instant(flare.begin_time),
            flare.source_location,
            format_instant(flare.peak_time)
        )
    }));
    lines
}

pub fn render_cmes(cmes: &[CoronalMassEjection]) -> Vec<String> {
    if cmes.is_empty() {
        return vec![NO_CMES.to_string()];
    }
    let mut lines = vec![format!("{} CME Events", cmes.len())];
    lines.extend(cmes.iter().take(MAX_DISPLAYED_SOLAR_EVENTS).map(|cme| {
        format!(
            "Coronal Mass Ejection | {} | Source: {} | {}",
            format_instant(cme.start_time),
            cme.source_location,
            cme.note
        )
    }));
    lines
}

pub fn render_storms(storms: &[GeomagneticStorm]) -> Vec<String> {
    if storms.is_empty() {
        return vec![NO_STORMS.to_string()];
    }
    let mut lines = vec![format!("{} Storm Events", storms.len())];
    lines.extend(storms.iter().take(MAX_DISPLAYED_SOLAR_EVENTS).map(|storm| {
        format!(
            "Geomagnetic Storm | {} | {}",
            format_instant(storm.start_time),
            storm.detail()
        )
    }));
    lines
}
