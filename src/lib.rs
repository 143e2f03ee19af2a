//! AstraPatch: a live space dashboard for the terminal.
//!
//! The [`loader`] drives every data source adapter in [`sources`] once, in a
//! fixed order, while publishing progress. Adapters fetch through
//! [`client::SpaceClient`] and write into named regions of a
//! [`board::Board`]. After the initial load, [`live`] keeps the launch
//! countdowns and the ISS position fresh on their own timers.

pub mod board;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod live;
pub mod loader;
pub mod render;
pub mod sources;
