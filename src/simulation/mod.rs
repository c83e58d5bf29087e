//! Standalone wrong-way detection simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full UI.

mod config;
mod context;
mod export;
mod plate;
mod records;
pub mod render;
mod stats;
mod terminal;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
pub use config::SimConfig;
pub use context::LoopContext;
pub use export::{detections_to_json, export_detections};
pub use plate::{generate_plate, is_valid_plate, PLATE_LEN};
pub use records::{AlertRecord, BoundedLog, DetectionRecord, LiveDetection};
pub use render::{Canvas, DrawCommand, DrawList, Rgba};
pub use stats::SimStats;
pub use terminal::AsciiCanvas;
pub use types::{
    Direction, Lane, LaneGroup, Point, SimId, VehicleId, VehicleKind, ALERT_ACTION, CANVAS_HEIGHT,
    CANVAS_WIDTH, EXPORT_FILE_NAME, LANES, PLATE_NOT_READ, PLATE_UNRECOGNIZED, VEHICLE_HEIGHT,
    VEHICLE_WIDTH,
};
pub use vehicle::{SimVehicle, VehicleUpdateResult};
pub use world::{SimWorld, TickOutcome};
