use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{lenient_f64, parse_instant, NamedPayload};

/// Launch Library status id for "To Be Confirmed".
pub const TO_BE_CONFIRMED_STATUS_ID: i64 = 8;

/// Launch Library status id for "Go for Launch".
pub const GO_STATUS_ID: i64 = 1;

/// Launch Library status id for "To Be Determined".
pub const TO_BE_DETERMINED_STATUS_ID: i64 = 2;

/// Response of `GET /launch/upcoming/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LaunchListResponse {
    pub count: Option<u64>,
    pub results: Option<Vec<LaunchPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LaunchPayload {
    pub name: Option<String>,
    pub status: Option<LaunchStatusPayload>,
    pub launch_service_provider: Option<NamedPayload>,
    pub mission: Option<NamedPayload>,
    pub pad: Option<PadPayload>,
    pub rocket: Option<RocketPayload>,
    #[serde(deserialize_with = "lenient_f64")]
    pub probability: Option<f64>,
    pub net: Option<String>,
    pub window_start: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LaunchStatusPayload {
    pub id: Option<i64>,
    pub abbrev: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PadPayload {
    pub location: Option<NamedPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RocketPayload {
    pub configuration: Option<NamedPayload>,
}

/// Visual state of a launch card's status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatusClass {
    Go,
    Tbd,
    Hold,
}

impl LaunchStatusClass {
    pub fn from_status_id(id: Option<i64>) -> Self {
        match id {
            Some(GO_STATUS_ID) => Self::Go,
            Some(TO_BE_DETERMINED_STATUS_ID) => Self::Tbd,
            _ => Self::Hold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Tbd => "tbd",
            Self::Hold => "hold",
        }
    }
}

/// An upcoming launch, normalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub name: String,
    pub provider: String,
    pub mission: String,
    pub status_id: Option<i64>,
    pub status_abbrev: String,
    pub status_class: LaunchStatusClass,
    pub location: String,
    pub rocket: String,
    /// Upstream success probability; zero and absent both mean unknown.
    pub probability: Option<f64>,
    /// `net`, falling back to `window_start`, when parseable.
    pub launch_time: Option<DateTime<Utc>>,
}

impl LaunchRecord {
    pub fn from_payload(payload: LaunchPayload) -> Self {
        let status_id = payload.status.as_ref().and_then(|s| s.id);
        let status_abbrev = payload
            .status
            .as_ref()
            .and_then(|s| s.abbrev.clone())
            .unwrap_or_else(|| "TBD".to_string());
        let location = payload
            .pad
            .and_then(|pad| NamedPayload::name_of(&pad.location))
            .unwrap_or_else(|| "Unknown".to_string());
        let rocket = payload
            .rocket
            .and_then(|rocket| NamedPayload::name_of(&rocket.configuration))
            .unwrap_or_else(|| "Unknown".to_string());
        let launch_time = payload
            .net
            .as_deref()
            .or(payload.window_start.as_deref())
            .and_then(parse_instant);

        Self {
            name: payload
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Unknown Mission".to_string()),
            provider: NamedPayload::name_of(&payload.launch_service_provider)
                .unwrap_or_else(|| "Unknown".to_string()),
            mission: NamedPayload::name_of(&payload.mission)
                .unwrap_or_else(|| "Classified".to_string()),
            status_id,
            status_abbrev,
            status_class: LaunchStatusClass::from_status_id(status_id),
            location,
            rocket,
            probability: payload.probability.filter(|p| *p != 0.0),
            launch_time,
        }
    }

    /// Lowercased provider name used by provider filters.
    pub fn provider_key(&self) -> String {
        if self.provider == "Unknown" {
            String::new()
        } else {
            self.provider.to_lowercase()
        }
    }

    pub fn probability_label(&self) -> String {
        match self.probability {
            Some(p) => format!("{}%", p),
            None => "TBD".to_string(),
        }
    }

    /// Whether this launch passes the provider filter (`"all"` matches everything).
    pub fn matches_provider(&self, filter: &str) -> bool {
        filter == "all" || self.provider_key().contains(&filter.to_lowercase())
    }
}

/// Whether an upstream entry is displayable: it has a status and that
/// status is not "To Be Confirmed".
pub fn is_displayable(payload: &LaunchPayload) -> bool {
    match &payload.status {
        Some(status) => status.id != Some(TO_BE_CONFIRMED_STATUS_ID),
        None => false,
    }
}

/// Drop unconfirmed launches, keep upstream order, truncate to `limit`.
pub fn select_launches(payloads: Vec<LaunchPayload>, limit: usize) -> Vec<LaunchRecord> {
    payloads
        .into_iter()
        .filter(is_displayable)
        .take(limit)
        .map(LaunchRecord::from_payload)
        .collect()
}
