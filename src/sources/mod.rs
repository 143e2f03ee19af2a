//! Data source adapters.
//!
//! One module per dashboard section. Each adapter fetches through
//! [`SpaceClient`](crate::client::SpaceClient), normalizes the payload with
//! the record types from `astrapatch_core::models`, and replaces its board
//! regions wholesale. Failures never propagate: the adapter logs a warning,
//! writes its fixed fallback text, and returns a neutral value.
//!
//! Rendering is kept in pure `render_*` functions so the text can be tested
//! without a network.

pub mod apod;
pub mod asteroids;
pub mod crew;
pub mod iss;
pub mod launches;
pub mod panels;
pub mod satellites;
pub mod solar;
pub mod spacewalks;

use chrono::{Days, NaiveDate};

/// `[today - days, today]`, for feeds that look back.
pub fn trailing_window(today: NaiveDate, days: u64) -> (NaiveDate, NaiveDate) {
    let start = today.checked_sub_days(Days::new(days)).unwrap_or(today);
    (start, today)
}

/// `[today, today + days]`, for feeds that look ahead.
pub fn leading_window(today: NaiveDate, days: u64) -> (NaiveDate, NaiveDate) {
    let end = today.checked_add_days(Days::new(days)).unwrap_or(today);
    (today, end)
}
