//! Core library for AstraPatch.
//!
//! Everything in this crate is pure: upstream payload shapes, the normalized
//! records the dashboard renders, and the offline calculators (countdowns,
//! moon phase, loading progress). Nothing here performs I/O.

pub mod countdown;
pub mod models;
pub mod moon;
pub mod progress;

pub use countdown::{Countdown, CountdownDisplay};
pub use moon::{moon_phase, MoonPhase, MoonPhaseResult};
pub use progress::LoadProgress;
