use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::parse_instant;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Label shown once a countdown target has passed.
pub const LAUNCHED_LABEL: &str = "LAUNCHED";

/// A countdown towards a fixed instant.
///
/// The target never changes after construction. Every call to
/// [`Countdown::display`] recomputes the remaining time from the caller's
/// `now`, so a countdown carries no state between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: DateTime<Utc>,
}

/// What a countdown shows at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownDisplay {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Launched,
}

impl Countdown {
    pub fn at(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    /// Parse an upstream timestamp (`net` / `window_start`).
    pub fn parse(raw: &str) -> Option<Self> {
        parse_instant(raw).map(Self::at)
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Floor-decompose the time left until the target.
    ///
    /// Days absorb everything above 24 hours; there is no carrying into
    /// larger units.
    pub fn display(&self, now: DateTime<Utc>) -> CountdownDisplay {
        let diff = (self.target - now).num_milliseconds();
        if diff <= 0 {
            return CountdownDisplay::Launched;
        }

        CountdownDisplay::Remaining {
            days: diff / MS_PER_DAY,
            hours: (diff % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (diff % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (diff % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

impl CountdownDisplay {
    pub fn is_launched(&self) -> bool {
        matches!(self, Self::Launched)
    }
}

impl fmt::Display for CountdownDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds),
            Self::Launched => f.write_str(LAUNCHED_LABEL),
        }
    }
}
