//! Vehicle state for the wrong-way simulation
//!
//! Standalone implementation that doesn't depend on Bevy. Updating a vehicle
//! only touches its state; drawing lives in the `render` module.

use rand::Rng;
use std::collections::VecDeque;

use super::config::SimConfig;
use super::plate::{generate_plate, random_kind};
use super::types::{
    Direction, Lane, Point, VehicleId, VehicleKind, PLATE_NOT_READ, PLATE_UNRECOGNIZED,
    VEHICLE_HEIGHT, VEHICLE_WIDTH,
};

/// Result of a vehicle update indicating what the world should do with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdateResult {
    Continue,         // Vehicle keeps moving
    EnteredLogBand,   // First tick inside the logging band
    Despawn,          // Vehicle left the visible area
}

/// A synthetic vehicle on the monitored road
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    /// Top-left corner of the vehicle body
    pub position: Point,
    pub width: f32,
    pub height: f32,
    pub direction: Direction,
    pub speed: f32,
    pub lane: Lane,
    /// Travelling against the lane's canonical direction
    pub is_wrong_way: bool,
    pub kind: VehicleKind,
    pub license_plate: String,
    pub plate_recognized: bool,
    pub plate_confidence: f32,
    pub detection_confidence: f32,
    /// Most recent positions, oldest first
    pub trajectory: VecDeque<Point>,
    trajectory_cap: usize,
    pub alert_generated: bool,
    pub logged: bool,
}

impl SimVehicle {
    /// Create a vehicle entering `lane`, drawing its identity and detector
    /// readings from `rng`
    pub fn spawn<R: Rng + ?Sized>(
        id: VehicleId,
        lane: Lane,
        is_wrong_way: bool,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let direction = if is_wrong_way {
            lane.canonical.opposite()
        } else {
            lane.canonical
        };
        let y = match direction {
            Direction::Down => -config.spawn_offset,
            Direction::Up => config.canvas_height + config.spawn_offset,
        };

        // Wrong-way drivers are drawn slightly slower
        let speed = if is_wrong_way {
            rng.random_range(2.0..4.0)
        } else {
            rng.random_range(2.0..5.0)
        };

        let detection_confidence = rng.random_range(0.85..0.99);
        let license_plate = generate_plate(rng);
        let plate_confidence = rng.random_range(0.75..0.99);
        let plate_recognized = rng.random_bool(config.plate_recognition_probability);
        let kind = random_kind(rng);

        Self {
            id,
            position: Point::new(lane.x, y),
            width: VEHICLE_WIDTH,
            height: VEHICLE_HEIGHT,
            direction,
            speed,
            lane,
            is_wrong_way,
            kind,
            license_plate,
            plate_recognized,
            plate_confidence,
            detection_confidence,
            trajectory: VecDeque::with_capacity(config.trajectory_len),
            trajectory_cap: config.trajectory_len,
            alert_generated: false,
            logged: false,
        }
    }

    /// Advance the vehicle by one tick
    pub fn update(&mut self, config: &SimConfig) -> VehicleUpdateResult {
        if self.trajectory.len() >= self.trajectory_cap {
            self.trajectory.pop_front();
        }
        self.trajectory.push_back(self.position);

        self.position.y += self.direction.sign() * self.speed;

        if !self.logged
            && self.position.y > config.log_band_top
            && self.position.y < config.log_band_bottom
        {
            self.logged = true;
            return VehicleUpdateResult::EnteredLogBand;
        }

        if self.is_off_screen(config.canvas_height, config.offscreen_margin) {
            return VehicleUpdateResult::Despawn;
        }

        VehicleUpdateResult::Continue
    }

    pub fn is_off_screen(&self, canvas_height: f32, margin: f32) -> bool {
        self.position.y > canvas_height + margin || self.position.y < -margin
    }

    pub fn center(&self) -> Point {
        self.position.offset(self.width / 2.0, self.height / 2.0)
    }

    /// Plate text for the detection table
    pub fn plate_or_placeholder(&self) -> &str {
        if self.plate_recognized {
            &self.license_plate
        } else {
            PLATE_NOT_READ
        }
    }

    /// Plate text for alerts
    pub fn plate_for_alert(&self) -> &str {
        if self.plate_recognized {
            &self.license_plate
        } else {
            PLATE_UNRECOGNIZED
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_wrong_way {
            "Wrong Direction"
        } else {
            "Normal"
        }
    }

    /// Banner shown above the bounding box, e.g. `WRONG WAY 93.4%`
    pub fn banner_label(&self) -> String {
        format!(
            "{} {:.1}%",
            if self.is_wrong_way { "WRONG WAY" } else { "Normal" },
            self.detection_confidence * 100.0
        )
    }

    /// Second banner line, e.g. `Truck - KA05MX7`
    pub fn identity_label(&self) -> String {
        format!("{} - {}", self.kind, self.plate_or_placeholder())
    }

    pub fn plate_confidence_label(&self) -> String {
        format!("{:.0}% conf", self.plate_confidence * 100.0)
    }
}
