//! Core types for the wrong-way detection simulation
//!
//! These are standalone types that don't depend on Bevy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub SimId);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:05}", self.0 .0)
    }
}

/// Direction of travel along the y axis of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards increasing y (top of the canvas to the bottom)
    Down,
    /// Towards decreasing y
    Up,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    /// Sign applied to speed when moving along y
    pub fn sign(self) -> f32 {
        match self {
            Direction::Down => 1.0,
            Direction::Up => -1.0,
        }
    }
}

/// Body type reported by the (simulated) classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Truck,
    Bus,
    Suv,
    Van,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 5] = [
        VehicleKind::Car,
        VehicleKind::Truck,
        VehicleKind::Bus,
        VehicleKind::Suv,
        VehicleKind::Van,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Truck => "Truck",
            VehicleKind::Bus => "Bus",
            VehicleKind::Suv => "SUV",
            VehicleKind::Van => "Van",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pair of lanes sharing a canonical direction, used for display labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneGroup {
    /// Left carriageway, lanes 1 and 2
    #[serde(rename = "Lane 1-2")]
    Southbound,
    /// Right carriageway, lanes 3 and 4
    #[serde(rename = "Lane 3-4")]
    Northbound,
}

impl LaneGroup {
    pub fn label(self) -> &'static str {
        match self {
            LaneGroup::Southbound => "Lane 1-2",
            LaneGroup::Northbound => "Lane 3-4",
        }
    }
}

impl fmt::Display for LaneGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed lane on the monitored road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Left edge of vehicles travelling in this lane
    pub x: f32,
    /// The direction traffic is supposed to travel in this lane
    pub canonical: Direction,
    pub group: LaneGroup,
}

impl Lane {
    pub const fn new(x: f32, canonical: Direction, group: LaneGroup) -> Self {
        Self { x, canonical, group }
    }
}

/// The four monitored lanes, left to right
pub const LANES: [Lane; 4] = [
    Lane::new(150.0, Direction::Down, LaneGroup::Southbound),
    Lane::new(220.0, Direction::Down, LaneGroup::Southbound),
    Lane::new(450.0, Direction::Up, LaneGroup::Northbound),
    Lane::new(520.0, Direction::Up, LaneGroup::Northbound),
];

/// A 2D position on the canvas (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Logical size of the render surface
pub const CANVAS_WIDTH: f32 = 700.0;
pub const CANVAS_HEIGHT: f32 = 500.0;

/// Vehicle footprint on the canvas
pub const VEHICLE_WIDTH: f32 = 40.0;
pub const VEHICLE_HEIGHT: f32 = 60.0;

/// Action string attached to every wrong-way alert
pub const ALERT_ACTION: &str = "Alert Sent to Traffic Control";

/// Placeholder for plates the OCR stage failed to read
pub const PLATE_NOT_READ: &str = "N/A";
pub const PLATE_UNRECOGNIZED: &str = "Unrecognized";

/// Default name of the exported detection log
pub const EXPORT_FILE_NAME: &str = "vehicle_detections_log.json";
