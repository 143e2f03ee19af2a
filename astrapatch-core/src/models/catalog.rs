//! Static reference data shown without any network access.

/// An annual meteor shower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeteorShower {
    pub name: &'static str,
    pub peak: &'static str,
    pub rate: &'static str,
    pub emoji: &'static str,
}

pub const METEOR_SHOWERS: [MeteorShower; 4] = [
    MeteorShower {
        name: "Quadrantids",
        peak: "January 3-4",
        rate: "80-120/hr",
        emoji: "⭐",
    },
    MeteorShower {
        name: "Lyrids",
        peak: "April 22-23",
        rate: "10-20/hr",
        emoji: "💫",
    },
    MeteorShower {
        name: "Perseids",
        peak: "August 12-13",
        rate: "60-100/hr",
        emoji: "🌠",
    },
    MeteorShower {
        name: "Geminids",
        peak: "December 13-14",
        rate: "120+/hr",
        emoji: "✨",
    },
];

/// Typical surface conditions on Mars.
///
/// InSight stopped reporting weather in 2022, so the panel shows climatology
/// instead of live readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarsConditions {
    pub mission_note: &'static str,
    pub temperature: &'static str,
    pub pressure: &'static str,
    pub atmosphere: &'static str,
    pub dust_storms: &'static str,
}

pub const MARS_CONDITIONS: MarsConditions = MarsConditions {
    mission_note: "InSight Mission Concluded (2022)",
    temperature: "-20°C to -80°C",
    pressure: "~600-700 Pa",
    atmosphere: "95% CO₂",
    dust_storms: "Seasonal",
};

/// Satellites listed next to the ISS without live tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedSatellite {
    pub name: &'static str,
    pub info: &'static str,
}

pub const UNTRACKED_SATELLITES: [TrackedSatellite; 3] = [
    TrackedSatellite {
        name: "Hubble Space Telescope",
        info: "Orbiting at ~540 km altitude",
    },
    TrackedSatellite {
        name: "Starlink Constellation",
        info: "Thousands of satellites in LEO",
    },
    TrackedSatellite {
        name: "James Webb Space Telescope",
        info: "Located at L2 Lagrange point",
    },
];
