use serde::Deserialize;

/// Response of `GET /planetary/apod`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApodPayload {
    pub media_type: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub explanation: Option<String>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// NASA's Astronomy Picture of the Day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureOfTheDay {
    pub media: MediaKind,
    pub url: Option<String>,
    pub title: String,
    pub date: String,
    pub explanation: String,
    pub copyright: Option<String>,
}

impl PictureOfTheDay {
    pub fn from_payload(payload: ApodPayload) -> Self {
        let media = match payload.media_type.as_deref() {
            Some("video") => MediaKind::Video,
            _ => MediaKind::Image,
        };

        Self {
            media,
            url: payload.url.filter(|u| !u.is_empty()),
            title: payload
                .title
                .unwrap_or_else(|| "Astronomy Picture".to_string()),
            date: payload.date.unwrap_or_default(),
            explanation: payload.explanation.unwrap_or_default(),
            copyright: payload
                .copyright
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_media_type() {
        let apod = PictureOfTheDay::from_payload(ApodPayload {
            media_type: Some("video".to_string()),
            url: Some("https://www.youtube.com/embed/abc".to_string()),
            ..Default::default()
        });
        assert_eq!(apod.media, MediaKind::Video);
        assert_eq!(apod.title, "Astronomy Picture");
        assert!(apod.copyright.is_none());
    }

    #[test]
    fn test_copyright_is_trimmed() {
        let apod = PictureOfTheDay::from_payload(ApodPayload {
            copyright: Some("\nJohn Doe\n".to_string()),
            ..Default::default()
        });
        assert_eq!(apod.media, MediaKind::Image);
        assert_eq!(apod.copyright.as_deref(), Some("John Doe"));
    }
}
