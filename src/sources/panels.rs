//! Panels computed locally, without any network request.

use chrono::NaiveDate;

use astrapatch_core::models::catalog::{MARS_CONDITIONS, METEOR_SHOWERS};
use astrapatch_core::{moon_phase as compute_moon_phase, MoonPhaseResult};

use crate::board::{Board, Region};

pub fn mars_weather(board: &Board) {
    let mars = MARS_CONDITIONS;
    board.replace(
        Region::MarsWeather,
        vec![
            mars.mission_note.to_string(),
            format!("Temperature: {}", mars.temperature),
            format!("Pressure: {}", mars.pressure),
            format!("Atmosphere: {}", mars.atmosphere),
            format!("Dust Storms: {}", mars.dust_storms),
        ],
    );
}

pub fn meteor_showers(board: &Board) {
    board.replace(
        Region::MeteorShowers,
        METEOR_SHOWERS
            .iter()
            .map(|shower| {
                format!(
                    "{} {} | Peak: {} | Rate: {}",
                    shower.emoji, shower.name, shower.peak, shower.rate
                )
            })
            .collect(),
    );
}

pub fn moon_phase(board: &Board, date: NaiveDate) -> MoonPhaseResult {
    let result = compute_moon_phase(date);
    board.replace(Region::MoonPhase, render_moon(&result));
    result
}

pub fn render_moon(result: &MoonPhaseResult) -> Vec<String> {
    vec![
        format!("{} {}", result.phase.emoji(), result.phase.name()),
        format!("{}% Illuminated", result.illumination),
        "Lunar Cycle: 29.5 days".to_string(),
    ]
}
