use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{parse_instant, NamedPayload};

/// Response of `GET /spacewalk/upcoming/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpacewalkResponse {
    pub results: Option<Vec<SpacewalkPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpacewalkPayload {
    pub name: Option<String>,
    pub start: Option<String>,
    pub duration: Option<String>,
    pub crew: Option<Vec<CrewAssignmentPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrewAssignmentPayload {
    pub astronaut: Option<NamedPayload>,
}

/// A scheduled extravehicular activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacewalk {
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub crew: Vec<String>,
    /// ISO 8601 duration as sent upstream (`PT6H30M`), or "TBD".
    pub duration: String,
}

impl Spacewalk {
    pub fn from_payload(payload: SpacewalkPayload) -> Self {
        let crew = payload
            .crew
            .unwrap_or_default()
            .into_iter()
            .filter_map(|member| NamedPayload::name_of(&member.astronaut))
            .collect();

        Self {
            title: payload
                .name
                .unwrap_or_else(|| "Extravehicular Activity".to_string()),
            start: payload.start.as_deref().and_then(parse_instant),
            crew,
            duration: payload
                .duration
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "TBD".to_string()),
        }
    }

    pub fn crew_label(&self) -> String {
        if self.crew.is_empty() {
            "TBA".to_string()
        } else {
            self.crew.join(", ")
        }
    }
}
