//! Upstream payloads and the records the dashboard renders.
//!
//! # Two layers per source
//!
//! - `*Payload` / `*Response` types mirror the third-party JSON. Every field is
//!   optional because none of the upstream schemas are versioned or
//!   guaranteed; a missing field never fails deserialization.
//! - Normalized records ([`LaunchRecord`], [`IssState`], [`Asteroid`], ...) are
//!   built from payloads with an explicit fallback for each missing field
//!   ("Unknown", "TBD", "Classified", ...). Renderers only ever see these.
//!
//! Static catalogs that never touch the network live in [`catalog`].

mod apod;
mod asteroid;
pub mod catalog;
mod crew;
mod iss;
mod launch;
mod solar;
mod spacewalk;

pub use apod::*;
pub use asteroid::*;
pub use crew::*;
pub use iss::*;
pub use launch::*;
pub use solar::*;
pub use spacewalk::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `{ "name": ... }` objects, used for providers, agencies, missions and pads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedPayload {
    pub name: Option<String>,
}

impl NamedPayload {
    /// Name of an optional nested object, if both exist and the name is non-empty.
    pub fn name_of(named: &Option<NamedPayload>) -> Option<String> {
        named
            .as_ref()
            .and_then(|n| n.name.clone())
            .filter(|name| !name.trim().is_empty())
    }
}

/// Parse the timestamp formats the upstream services emit.
///
/// Launch Library uses RFC 3339; DONKI drops the seconds (`2024-05-10T06:54Z`).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Accept a JSON number, a numeric string, or null.
///
/// NASA sends distances as strings (`"45290298.225"`) while other services
/// send bare numbers; anything else reads as absent.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
