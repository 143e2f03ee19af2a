//! Named display regions.
//!
//! Every adapter owns one or more [`Region`]s and replaces a region's content
//! as a whole; readers never observe a half-written region.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A stable, named area of the dashboard.
///
/// Variant order is the order regions are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    LaunchCount,
    Launches,
    Countdowns,
    IssPosition,
    IssLocation,
    Satellites,
    Crew,
    Spacewalks,
    ActiveEvents,
    SolarFlares,
    CmeEvents,
    GeoStorms,
    Asteroids,
    MarsWeather,
    MeteorShowers,
    MoonPhase,
    Apod,
}

impl Region {
    pub const ALL: [Region; 17] = [
        Self::LaunchCount,
        Self::Launches,
        Self::Countdowns,
        Self::IssPosition,
        Self::IssLocation,
        Self::Satellites,
        Self::Crew,
        Self::Spacewalks,
        Self::ActiveEvents,
        Self::SolarFlares,
        Self::CmeEvents,
        Self::GeoStorms,
        Self::Asteroids,
        Self::MarsWeather,
        Self::MeteorShowers,
        Self::MoonPhase,
        Self::Apod,
    ];

    /// Machine-friendly identifier.
    pub fn key(&self) -> &'static str {
        match self {
            Self::LaunchCount => "launch_count",
            Self::Launches => "launches",
            Self::Countdowns => "countdowns",
            Self::IssPosition => "iss_position",
            Self::IssLocation => "iss_location",
            Self::Satellites => "satellites",
            Self::Crew => "crew",
            Self::Spacewalks => "spacewalks",
            Self::ActiveEvents => "active_events",
            Self::SolarFlares => "solar_flares",
            Self::CmeEvents => "cme_events",
            Self::GeoStorms => "geo_storms",
            Self::Asteroids => "asteroids",
            Self::MarsWeather => "mars_weather",
            Self::MeteorShowers => "meteor_showers",
            Self::MoonPhase => "moon_phase",
            Self::Apod => "apod",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::LaunchCount => "Upcoming Launches",
            Self::Launches => "Launch Schedule",
            Self::Countdowns => "T-Minus",
            Self::IssPosition => "ISS Position",
            Self::IssLocation => "ISS Ground Track",
            Self::Satellites => "Satellites",
            Self::Crew => "Crew Aboard the ISS",
            Self::Spacewalks => "Upcoming Spacewalks",
            Self::ActiveEvents => "Solar Events (30 days)",
            Self::SolarFlares => "Solar Flares",
            Self::CmeEvents => "Coronal Mass Ejections",
            Self::GeoStorms => "Geomagnetic Storms",
            Self::Asteroids => "Near-Earth Asteroids",
            Self::MarsWeather => "Mars Weather",
            Self::MeteorShowers => "Meteor Showers",
            Self::MoonPhase => "Moon Phase",
            Self::Apod => "Astronomy Picture of the Day",
        }
    }
}

/// Shared, cloneable set of region contents.
#[derive(Debug, Clone, Default)]
pub struct Board {
    regions: Arc<Mutex<BTreeMap<Region, Vec<String>>>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full content of a region.
    pub fn replace(&self, region: Region, lines: Vec<String>) {
        tracing::trace!(region = region.key(), lines = lines.len(), "region updated");
        let mut regions = self.regions.lock().expect("board lock poisoned");
        regions.insert(region, lines);
    }

    /// Replace a region with a single line.
    pub fn set_text(&self, region: Region, text: impl Into<String>) {
        self.replace(region, vec![text.into()]);
    }

    pub fn lines(&self, region: Region) -> Option<Vec<String>> {
        let regions = self.regions.lock().expect("board lock poisoned");
        regions.get(&region).cloned()
    }

    /// Region content joined with newlines.
    pub fn text(&self, region: Region) -> Option<String> {
        self.lines(region).map(|lines| lines.join("\n"))
    }

    pub fn contains(&self, region: Region) -> bool {
        let regions = self.regions.lock().expect("board lock poisoned");
        regions.contains_key(&region)
    }

    /// Copy of every populated region, in render order.
    pub fn snapshot(&self) -> BTreeMap<Region, Vec<String>> {
        self.regions.lock().expect("board lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_overwrites_whole_region() {
        let board = Board::new();
        board.replace(Region::Crew, vec!["a".into(), "b".into()]);
        board.replace(Region::Crew, vec!["c".into()]);
        assert_eq!(board.lines(Region::Crew), Some(vec!["c".to_string()]));
    }

    #[test]
    fn test_clones_share_state() {
        let board = Board::new();
        let other = board.clone();
        other.set_text(Region::ActiveEvents, "5");
        assert_eq!(board.text(Region::ActiveEvents).as_deref(), Some("5"));
    }

    #[test]
    fn test_snapshot_is_in_render_order() {
        let board = Board::new();
        board.set_text(Region::Apod, "z");
        board.set_text(Region::LaunchCount, "a");
        let keys: Vec<_> = board.snapshot().into_keys().collect();
        assert_eq!(keys, vec![Region::LaunchCount, Region::Apod]);
    }

    #[test]
    fn test_region_keys_are_unique() {
        let mut keys: Vec<_> = Region::ALL.iter().map(|r| r.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Region::ALL.len());
    }
}
