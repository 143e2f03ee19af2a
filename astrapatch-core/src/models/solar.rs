use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{lenient_f64, parse_instant};

/// Length of the trailing window queried from DONKI, in days.
pub const SOLAR_WINDOW_DAYS: i64 = 30;

/// Entries displayed per solar feed. The count still covers the full feed.
pub const MAX_DISPLAYED_SOLAR_EVENTS: usize = 5;

/// The three DONKI feeds the dashboard follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarKind {
    Flares,
    CoronalMassEjections,
    GeomagneticStorms,
}

impl SolarKind {
    /// DONKI endpoint name.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Flares => "FLR",
            Self::CoronalMassEjections => "CME",
            Self::GeomagneticStorms => "GST",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Flares => "solar flare",
            Self::CoronalMassEjections => "CME",
            Self::GeomagneticStorms => "geomagnetic storm",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlarePayload {
    pub class_type: Option<String>,
    pub begin_time: Option<String>,
    pub peak_time: Option<String>,
    pub source_location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CmePayload {
    #[serde(rename = "activityID")]
    pub activity_id: Option<String>,
    pub start_time: Option<String>,
    pub source_location: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StormPayload {
    pub start_time: Option<String>,
    pub all_kp_index: Option<Vec<KpIndexPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KpIndexPayload {
    #[serde(deserialize_with = "lenient_f64")]
    pub kp_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarFlare {
    pub class_type: String,
    pub begin_time: Option<DateTime<Utc>>,
    pub peak_time: Option<DateTime<Utc>>,
    pub source_location: String,
}

impl SolarFlare {
    pub fn from_payload(payload: FlarePayload) -> Self {
        Self {
            class_type: payload.class_type.unwrap_or_else(|| "?".to_string()),
            begin_time: payload.begin_time.as_deref().and_then(parse_instant),
            peak_time: payload.peak_time.as_deref().and_then(parse_instant),
            source_location: non_empty_or(payload.source_location, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoronalMassEjection {
    pub start_time: Option<DateTime<Utc>>,
    pub source_location: String,
    pub note: String,
}

impl CoronalMassEjection {
    pub fn from_payload(payload: CmePayload) -> Self {
        // Activity ids lead with the start instant: "2024-05-10T06:54:00-CME-001".
        let start_time = payload
            .start_time
            .as_deref()
            .and_then(parse_instant)
            .or_else(|| {
                payload
                    .activity_id
                    .as_deref()
                    .and_then(|id| id.split("-CME").next())
                    .and_then(parse_instant)
            });

        Self {
            start_time,
            source_location: non_empty_or(payload.source_location, "Unknown"),
            note: non_empty_or(payload.note, "CME detected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeomagneticStorm {
    pub start_time: Option<DateTime<Utc>>,
    /// First reported Kp index, if any.
    pub kp_index: Option<f64>,
}

impl GeomagneticStorm {
    pub fn from_payload(payload: StormPayload) -> Self {
        Self {
            start_time: payload.start_time.as_deref().and_then(parse_instant),
            kp_index: payload
                .all_kp_index
                .and_then(|readings| readings.into_iter().next())
                .and_then(|reading| reading.kp_index),
        }
    }

    pub fn detail(&self) -> String {
        match self.kp_index {
            Some(kp) if kp != 0.0 => format!("Kp Index: {}", kp),
            _ => "Storm detected".to_string(),
        }
    }
}

/// Per-feed event counts over the trailing window.
///
/// Each count is produced independently; a failed feed contributes zero
/// without affecting the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolarEventCounts {
    pub flares: usize,
    pub cmes: usize,
    pub storms: usize,
}

impl SolarEventCounts {
    pub fn total(&self) -> usize {
        self.flares + self.cmes + self.storms
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_additive() {
        let counts = SolarEventCounts {
            flares: 3,
            cmes: 0,
            storms: 2,
        };
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_flare_from_donki_json() {
        let json = r#"{
            "flrID": "2024-05-10T06:27:00-FLR-001",
            "classType": "X3.9",
            "beginTime": "2024-05-10T06:27Z",
            "peakTime": "2024-05-10T06:54Z",
            "sourceLocation": "S17W29"
        }"#;
        let flare = SolarFlare::from_payload(serde_json::from_str(json).unwrap());
        assert_eq!(flare.class_type, "X3.9");
        assert_eq!(flare.source_location, "S17W29");
        assert!(flare.peak_time.is_some());
    }

    #[test]
    fn test_cme_time_falls_back_to_activity_id() {
        let json = r#"{"activityID": "2024-05-10T06:54:00-CME-001", "sourceLocation": ""}"#;
        let cme = CoronalMassEjection::from_payload(serde_json::from_str(json).unwrap());
        assert!(cme.start_time.is_some());
        assert_eq!(cme.source_location, "Unknown");
        assert_eq!(cme.note, "CME detected");
    }

    #[test]
    fn test_storm_detail() {
        let json = r#"{"startTime": "2024-05-10T15:00Z", "allKpIndex": [{"kpIndex": 8.67}, {"kpIndex": 9}]}"#;
        let storm = GeomagneticStorm::from_payload(serde_json::from_str(json).unwrap());
        assert_eq!(storm.detail(), "Kp Index: 8.67");

        let quiet = GeomagneticStorm::from_payload(StormPayload::default());
        assert_eq!(quiet.detail(), "Storm detected");
    }
}
