//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::simulation::{LoopContext, Point, SimWorld, VehicleId};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

/// Resource wrapper for the loop context driving the world
#[derive(Resource)]
pub struct LoopResource(pub LoopContext);

/// Where the E key writes the detections log
#[derive(Resource)]
pub struct ExportSettings {
    pub dir: PathBuf,
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker component for the road surface sprite
#[derive(Component)]
pub struct RoadSurface;

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Dashboard counters in the top bar
#[derive(Component, Clone, Copy)]
pub enum StatText {
    TotalVehicles,
    WrongWay,
    PlatesRead,
    Accuracy,
    Fps,
}

/// Multi-line panels down the right-hand side
#[derive(Component, Clone, Copy)]
pub enum PanelText {
    Status,
    ActiveDetections,
    AlertLog,
    RecentDetections,
}

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub vehicles: HashMap<VehicleId, Entity>,
}

/// Window size in logical pixels
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Screen position of the camera feed's top-left corner
pub const FEED_LEFT: f32 = 20.0;
pub const FEED_TOP: f32 = 110.0;

/// Convert a canvas point (origin top-left, y down) to 2D world space
/// (origin at the window centre, y up)
pub fn canvas_to_world(p: Point) -> Vec2 {
    Vec2::new(
        FEED_LEFT + p.x - WINDOW_WIDTH as f32 / 2.0,
        WINDOW_HEIGHT as f32 / 2.0 - FEED_TOP - p.y,
    )
}
