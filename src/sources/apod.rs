use chrono::NaiveDate;

use astrapatch_core::models::{MediaKind, PictureOfTheDay};

use crate::board::Region;
use crate::dashboard::Dashboard;

pub const UNAVAILABLE: &str = "APOD Service Temporarily Unavailable";

/// Astronomy Picture of the Day. On failure a placeholder card is shown.
pub async fn load(dashboard: &Dashboard) -> Option<PictureOfTheDay> {
    let board = dashboard.board();
    match dashboard.client().apod().await {
        Ok(payload) => {
            let apod = PictureOfTheDay::from_payload(payload);
            board.replace(Region::Apod, render_apod(&apod));
            Some(apod)
        }
        Err(e) => {
            tracing::warn!("Failed to load APOD: {}", e);
            board.replace(Region::Apod, render_placeholder(dashboard.today()));
            None
        }
    }
}

pub fn render_apod(apod: &PictureOfTheDay) -> Vec<String> {
    let mut lines = vec![apod.title.clone()];
    if !apod.date.is_empty() {
        lines.push(apod.date.clone());
    }
    if let Some(url) = &apod.url {
        let kind = match apod.media {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        };
        lines.push(format!("{}: {}", kind, url));
    }
    if !apod.explanation.is_empty() {
        lines.push(apod.explanation.clone());
    }
    if let Some(copyright) = &apod.copyright {
        lines.push(format!("© {}", copyright));
    }
    lines
}

pub fn render_placeholder(today: NaiveDate) -> Vec<String> {
    vec![
        UNAVAILABLE.to_string(),
        "Astronomy Picture of the Day".to_string(),
        today.format("%Y-%m-%d").to_string(),
        "The Astronomy Picture of the Day service is currently unavailable. \
         Please check back later."
            .to_string(),
    ]
}
