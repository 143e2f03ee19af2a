use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::lenient_f64;

/// NORAD catalog number of the International Space Station.
pub const ISS_NORAD_ID: u32 = 25544;

/// Above this absolute latitude the ISS is reported as over a polar region.
pub const POLAR_LATITUDE: f64 = 60.0;

/// Response of `GET /satellites/25544`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssPositionPayload {
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub altitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub velocity: Option<f64>,
    pub visibility: Option<String>,
}

/// Last known position of the ISS.
///
/// Replaced wholesale on every successful poll and left untouched when a
/// poll fails, so a stale position is preferred over none.
#[derive(Debug, Clone, PartialEq)]
pub struct IssState {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    pub velocity_kmh: f64,
    pub visibility: String,
    pub fetched_at: DateTime<Utc>,
}

impl IssState {
    /// Build a state from a poll response.
    ///
    /// Returns `None` without coordinates: a position with no position is
    /// treated as a malformed response rather than defaulted to 0°, 0°.
    pub fn from_payload(payload: IssPositionPayload, fetched_at: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            latitude: payload.latitude?,
            longitude: payload.longitude?,
            altitude_km: payload.altitude.unwrap_or(0.0),
            velocity_kmh: payload.velocity.unwrap_or(0.0),
            visibility: payload
                .visibility
                .unwrap_or_else(|| "unknown".to_string()),
            fetched_at,
        })
    }

    pub fn is_polar(&self) -> bool {
        self.latitude.abs() >= POLAR_LATITUDE
    }

    /// Human-readable description of where the station is.
    pub fn location_line(&self) -> String {
        if self.is_polar() {
            format!(
                "Currently over polar region at {:.2}°, {:.2}°",
                self.latitude, self.longitude
            )
        } else {
            format!(
                "Currently over coordinates {:.2}°, {:.2}°",
                self.latitude, self.longitude
            )
        }
    }
}
