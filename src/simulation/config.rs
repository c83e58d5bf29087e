//! Tunable simulation parameters
//!
//! Defaults match the monitoring dashboard. Any subset of fields can
//! be overridden from a JSON file; missing fields keep their defaults.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,

    /// Chance per tick that a new vehicle is spawned
    pub spawn_probability: f64,
    /// No spawns while this many vehicles are live
    pub max_vehicles: usize,
    /// Chance a spawned vehicle travels against its lane
    pub wrong_way_probability: f64,
    /// Chance the OCR stage reads a vehicle's plate
    pub plate_recognition_probability: f64,

    /// Vehicles are logged the first time y falls strictly inside this band
    pub log_band_top: f32,
    pub log_band_bottom: f32,

    /// Distance past the canvas edge at which vehicles are removed
    pub offscreen_margin: f32,
    /// Distance before the canvas edge at which vehicles appear
    pub spawn_offset: f32,

    pub trajectory_len: usize,
    pub max_alerts: usize,
    pub max_recent_detections: usize,

    pub fps_window_ms: u64,

    /// Displayed model accuracy, a fixed figure
    pub accuracy: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            spawn_probability: 0.03,
            max_vehicles: 12,
            wrong_way_probability: 0.15,
            plate_recognition_probability: 0.85,
            log_band_top: 200.0,
            log_band_bottom: 300.0,
            offscreen_margin: 100.0,
            spawn_offset: 60.0,
            trajectory_len: 10,
            max_alerts: 5,
            max_recent_detections: 10,
            fps_window_ms: 1000,
            accuracy: 98.5,
        }
    }
}

impl SimConfig {
    /// Load a config from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("spawn_probability", self.spawn_probability),
            ("wrong_way_probability", self.wrong_way_probability),
            ("plate_recognition_probability", self.plate_recognition_probability),
        ] {
            ensure!((0.0..=1.0).contains(&p), "{name} must be within 0..=1, got {p}");
        }
        ensure!(
            self.canvas_width > 0.0 && self.canvas_height > 0.0,
            "canvas size must be positive"
        );
        ensure!(
            self.log_band_top < self.log_band_bottom,
            "log band top must lie above its bottom"
        );
        ensure!(self.trajectory_len > 0, "trajectory_len must be at least 1");
        ensure!(self.fps_window_ms > 0, "fps_window_ms must be at least 1");
        Ok(())
    }
}
