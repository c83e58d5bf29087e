//! Wrong-Way Detection Simulation Library
//!
//! A synthetic traffic-monitoring simulation that can run headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
