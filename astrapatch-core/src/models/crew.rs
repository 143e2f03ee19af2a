use serde::Deserialize;

use super::NamedPayload;

/// Portrait used when an astronaut has no profile image.
pub const PLACEHOLDER_PORTRAIT: &str = "https://via.placeholder.com/150";

/// Response of `GET /astronaut/?on_iss=true`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrewResponse {
    pub results: Option<Vec<AstronautPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AstronautPayload {
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub agency: Option<NamedPayload>,
}

/// A person currently aboard the ISS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewMember {
    pub name: String,
    pub agency: String,
    pub profile_image: String,
}

impl CrewMember {
    pub fn from_payload(payload: AstronautPayload) -> Self {
        Self {
            name: payload.name.unwrap_or_else(|| "Unknown".to_string()),
            agency: NamedPayload::name_of(&payload.agency)
                .unwrap_or_else(|| "Unknown Agency".to_string()),
            profile_image: payload
                .profile_image
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_PORTRAIT.to_string()),
        }
    }
}
