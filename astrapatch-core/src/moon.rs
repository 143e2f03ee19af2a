//! Offline moon phase calculation.
//!
//! The phase position is the fractional number of synodic months elapsed
//! since a reference new moon (2000-01-06). It is bucketed into eight named
//! phases, each centred on a multiple of 1/8, and illumination rises
//! linearly from 0% at new moon to 100% at full moon and back.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Mean length of the lunation used for phase math, in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Julian day of the reference new moon (2000-01-06 00:00 UTC).
pub const REFERENCE_NEW_MOON_JD: f64 = 2_451_549.5;

/// Upper (exclusive) bound of each phase bucket, starting at new moon.
const PHASE_BOUNDARIES: [f64; 8] = [
    0.0625, 0.1875, 0.3125, 0.4375, 0.5625, 0.6875, 0.8125, 0.9375,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        Self::New,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::Full,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Bucket a phase position in `[0, 1)`.
    ///
    /// New moon wraps around: it covers both `[0, 0.0625)` and
    /// `[0.9375, 1)`.
    pub fn from_fraction(fraction: f64) -> Self {
        PHASE_BOUNDARIES
            .iter()
            .position(|upper| fraction < *upper)
            .map(|index| Self::ALL[index])
            .unwrap_or(Self::New)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::New => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::Full => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn emoji(&self) -> char {
        match self {
            Self::New => '🌑',
            Self::WaxingCrescent => '🌒',
            Self::FirstQuarter => '🌓',
            Self::WaxingGibbous => '🌔',
            Self::Full => '🌕',
            Self::WaningGibbous => '🌖',
            Self::LastQuarter => '🌗',
            Self::WaningCrescent => '🌘',
        }
    }
}

/// Phase of the moon on a given calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPhaseResult {
    pub phase: MoonPhase,
    /// Percentage of the disc lit, 0 to 100.
    pub illumination: u8,
    /// Position within the synodic month, in `[0, 1)`.
    pub fraction: f64,
}

/// Civil (Gregorian) date to Julian day at 00:00 UTC.
///
/// January and February count as months 13 and 14 of the previous year.
pub fn julian_day(date: NaiveDate) -> f64 {
    let (year, month) = if date.month() <= 2 {
        (date.year() - 1, date.month() + 12)
    } else {
        (date.year(), date.month())
    };
    let year = f64::from(year);
    let month = f64::from(month);
    let day = f64::from(date.day());

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Position within the current lunation, in `[0, 1)`.
pub fn phase_fraction(date: NaiveDate) -> f64 {
    let lunations = (julian_day(date) - REFERENCE_NEW_MOON_JD) / SYNODIC_MONTH_DAYS;
    lunations - lunations.floor()
}

/// Triangular illumination curve: 0% at new moon, 100% at full moon.
pub fn illumination(fraction: f64) -> u8 {
    let lit = if fraction >= 0.5 {
        (1.0 - fraction) * 200.0
    } else {
        fraction * 200.0
    };
    lit.round().clamp(0.0, 100.0) as u8
}

pub fn moon_phase(date: NaiveDate) -> MoonPhaseResult {
    let fraction = phase_fraction(date);
    MoonPhaseResult {
        phase: MoonPhase::from_fraction(fraction),
        illumination: illumination(fraction),
        fraction,
    }
}
