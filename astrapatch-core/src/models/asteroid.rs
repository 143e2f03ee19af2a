use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::{lenient_f64, parse_date};

/// Days ahead covered by the NeoWs feed query.
pub const ASTEROID_WINDOW_DAYS: i64 = 7;

/// Closest approaches shown on the dashboard.
pub const MAX_DISPLAYED_ASTEROIDS: usize = 5;

/// Response of NeoWs `GET /neo/rest/v1/feed`.
///
/// `near_earth_objects` is keyed by date. Values are kept as raw JSON so a
/// single malformed day or entry is skipped instead of failing the feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NeoFeedResponse {
    pub near_earth_objects: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NeoPayload {
    pub name: Option<String>,
    pub is_potentially_hazardous_asteroid: Option<bool>,
    pub close_approach_data: Option<Vec<CloseApproachPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CloseApproachPayload {
    pub close_approach_date: Option<String>,
    pub miss_distance: Option<MissDistancePayload>,
    pub relative_velocity: Option<RelativeVelocityPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MissDistancePayload {
    #[serde(deserialize_with = "lenient_f64")]
    pub kilometers: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelativeVelocityPayload {
    #[serde(deserialize_with = "lenient_f64")]
    pub kilometers_per_hour: Option<f64>,
}

/// First close approach listed for an object.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    pub date: Option<NaiveDate>,
    pub miss_distance_km: f64,
    pub velocity_kmh: f64,
}

/// A near-Earth object in the feed window.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub name: String,
    pub hazardous: bool,
    pub approach: Option<CloseApproach>,
}

impl Asteroid {
    pub fn from_payload(payload: NeoPayload) -> Self {
        let approach = payload
            .close_approach_data
            .and_then(|data| data.into_iter().next())
            .map(|first| CloseApproach {
                date: first.close_approach_date.as_deref().and_then(parse_date),
                miss_distance_km: first
                    .miss_distance
                    .and_then(|d| d.kilometers)
                    .unwrap_or(0.0),
                velocity_kmh: first
                    .relative_velocity
                    .and_then(|v| v.kilometers_per_hour)
                    .unwrap_or(0.0),
            });

        Self {
            name: payload.name.unwrap_or_else(|| "Unknown".to_string()),
            hazardous: payload.is_potentially_hazardous_asteroid.unwrap_or(false),
            approach,
        }
    }

    pub fn approach_date(&self) -> Option<NaiveDate> {
        self.approach.as_ref().and_then(|a| a.date)
    }
}

/// Flatten the date-keyed feed into one list.
///
/// Days whose value is not an array, and entries that are not objects, are
/// skipped.
pub fn flatten_feed(near_earth_objects: BTreeMap<String, Value>) -> Vec<Asteroid> {
    near_earth_objects
        .into_values()
        .filter_map(|day| match day {
            Value::Array(entries) => Some(entries),
            _ => None,
        })
        .flatten()
        .filter_map(|entry| serde_json::from_value::<NeoPayload>(entry).ok())
        .map(Asteroid::from_payload)
        .collect()
}

/// Order by first close-approach date, earliest first.
///
/// Objects without a usable date sort after every dated object and keep their
/// relative feed order.
pub fn by_approach_date(a: &Asteroid, b: &Asteroid) -> Ordering {
    match (a.approach_date(), b.approach_date()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The `limit` earliest approaches, ascending.
pub fn closest_approaches(mut asteroids: Vec<Asteroid>, limit: usize) -> Vec<Asteroid> {
    asteroids.sort_by(by_approach_date);
    asteroids.truncate(limit);
    asteroids
}
