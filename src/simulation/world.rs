//! Main simulation world that ties everything together
//!
//! This is the entry point for running the wrong-way detection simulation
//! without any Bevy dependencies.

use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::time::Instant;

use super::config::SimConfig;
use super::context::LoopContext;
use super::records::{AlertRecord, BoundedLog, DetectionRecord, LiveDetection};
use super::render::{
    draw_background, draw_scene, draw_vehicle_body, draw_vehicle_overlay, Canvas,
};
use super::stats::SimStats;
use super::terminal::AsciiCanvas;
use super::types::{SimId, VehicleId, LANES};
use super::vehicle::{SimVehicle, VehicleUpdateResult};

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The loop is running; schedule the next tick
    Continue,
    /// The loop is stopped; nothing was done
    Stopped,
}

/// The main simulation world
#[derive(Clone)]
pub struct SimWorld {
    pub config: SimConfig,

    /// Live vehicles in spawn order
    pub vehicles: Vec<SimVehicle>,

    /// Aggregate counters
    pub stats: SimStats,

    /// Wrong-way alerts, newest first
    pub alerts: BoundedLog<AlertRecord>,

    /// Vehicles that crossed the logging band, newest first
    pub recent_detections: BoundedLog<DetectionRecord>,

    /// Snapshot of the live vehicles, rebuilt every tick
    pub current_detections: Vec<LiveDetection>,

    /// Next ID to assign
    next_id: usize,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    fn new_internal(config: SimConfig, rng: Option<StdRng>) -> Self {
        Self {
            vehicles: Vec::with_capacity(config.max_vehicles),
            stats: SimStats::new(config.accuracy),
            alerts: BoundedLog::new(config.max_alerts),
            recent_detections: BoundedLog::new(config.max_recent_detections),
            current_detections: Vec::new(),
            next_id: 0,
            rng,
            config,
        }
    }

    pub fn new() -> Self {
        Self::new_internal(SimConfig::default(), None)
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_internal(SimConfig::default(), Some(StdRng::seed_from_u64(seed)))
    }

    /// Create a world with custom parameters and an optional seed.
    /// Fails if the config does not pass `SimConfig::validate`.
    pub fn with_config(config: SimConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_internal(config, seed.map(StdRng::seed_from_u64)))
    }

    /// Create a loop context matching this world's FPS window
    pub fn new_context(&self, now: Instant) -> LoopContext {
        LoopContext::new(
            std::time::Duration::from_millis(self.config.fps_window_ms),
            now,
        )
    }

    /// Run `f` with the seeded RNG if there is one, the thread RNG otherwise
    fn with_rng<T>(&mut self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match &mut self.rng {
            Some(rng) => f(rng),
            None => f(&mut rand::rng()),
        }
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(SimId(self.next_id));
        self.next_id += 1;
        id
    }

    /// Spawn a vehicle in the given lane (index into `LANES`).
    ///
    /// Wrong-way vehicles raise their alert here, once.
    pub fn spawn_in_lane(&mut self, lane_index: usize, wrong_way: bool) -> VehicleId {
        let lane = LANES[lane_index % LANES.len()];
        let id = self.next_vehicle_id();
        let config = self.config.clone();
        let mut vehicle = self.with_rng(|rng| SimVehicle::spawn(id, lane, wrong_way, &config, rng));

        self.stats
            .record_spawn(vehicle.is_wrong_way, vehicle.plate_recognized);

        debug!(
            "Spawned {} {} in {} heading {:?} at {:.1}px/tick (plate {})",
            vehicle.kind,
            vehicle.id,
            vehicle.lane.group,
            vehicle.direction,
            vehicle.speed,
            vehicle.plate_or_placeholder()
        );

        if vehicle.is_wrong_way && !vehicle.alert_generated {
            vehicle.alert_generated = true;
            let alert = AlertRecord::for_vehicle(&vehicle, time_label());
            info!(
                "WRONG WAY: {} in {} ({:.1}%), plate {}",
                vehicle.id,
                alert.lane,
                alert.confidence * 100.0,
                alert.plate
            );
            self.alerts.push(alert);
        }

        self.vehicles.push(vehicle);
        id
    }

    /// Spawn a vehicle in a random lane, wrong-way with the configured chance
    pub fn spawn_random(&mut self) -> VehicleId {
        let wrong_way_probability = self.config.wrong_way_probability;
        let (lane_index, wrong_way) = self.with_rng(|rng| {
            (
                rng.random_range(0..LANES.len()),
                rng.random_bool(wrong_way_probability),
            )
        });
        self.spawn_in_lane(lane_index, wrong_way)
    }

    /// Move every vehicle, log band crossings and drop vehicles that left
    fn update_vehicles(&mut self) {
        let config = &self.config;
        let recent = &mut self.recent_detections;

        self.vehicles.retain_mut(|vehicle| match vehicle.update(config) {
            VehicleUpdateResult::Continue => true,
            VehicleUpdateResult::EnteredLogBand => {
                recent.push(DetectionRecord::for_vehicle(vehicle, time_label()));
                true
            }
            VehicleUpdateResult::Despawn => {
                debug!("{} left the monitored area", vehicle.id);
                false
            }
        });
    }

    fn rebuild_current_detections(&mut self) {
        self.current_detections = self
            .vehicles
            .iter()
            .map(LiveDetection::from_vehicle)
            .collect();
    }

    /// Main simulation tick
    pub fn tick(&mut self, ctx: &mut LoopContext, now: Instant) -> TickOutcome {
        if !ctx.is_running() {
            return TickOutcome::Stopped;
        }

        self.update_vehicles();
        self.rebuild_current_detections();

        if let Some(fps) = ctx.count_frame(now) {
            self.stats.fps = fps;
        }

        let spawn_probability = self.config.spawn_probability;
        let roll = self.with_rng(|rng| rng.random_bool(spawn_probability));
        if roll && self.vehicles.len() < self.config.max_vehicles {
            self.spawn_random();
        }

        TickOutcome::Continue
    }

    /// Stop the loop and clear every vehicle, counter and log
    pub fn reset(&mut self, ctx: &mut LoopContext) {
        ctx.reset();
        self.vehicles.clear();
        self.stats.reset();
        self.alerts.clear();
        self.recent_detections.clear();
        self.current_detections.clear();
        info!("Simulation reset");
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Render the full scene onto a canvas
    pub fn render(&self, canvas: &mut dyn Canvas) {
        draw_scene(self, canvas);
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Wrong-Way Detection Summary ===");
        println!("{}", self.stats.summary());
        println!("Live vehicles: {}", self.vehicles.len());
        println!();

        if !self.current_detections.is_empty() {
            println!("--- Active Detections ---");
            for det in &self.current_detections {
                println!(
                    "  {} {:<9} {:.1}%  {}  plate={} ({:.0}%)",
                    det.id,
                    det.kind_label(),
                    det.confidence * 100.0,
                    det.lane,
                    det.plate,
                    det.plate_confidence * 100.0
                );
            }
        }

        if !self.alerts.is_empty() {
            println!("--- Alert Log ---");
            for alert in self.alerts.iter() {
                println!(
                    "  [{}] WRONG WAY {}  plate={}  {}",
                    alert.time, alert.lane, alert.plate, alert.action
                );
            }
        }

        if !self.recent_detections.is_empty() {
            println!("--- Recent Vehicle Detections ---");
            for det in self.recent_detections.iter() {
                println!(
                    "  [{}] {:<5} {:<7} {:.1}%  {}",
                    det.time,
                    det.vehicle_type,
                    det.license_plate,
                    det.confidence * 100.0,
                    det.status
                );
            }
        }
    }

    /// Draw a visual map of the road in the terminal
    pub fn draw_map(&self) {
        let mut canvas = AsciiCanvas::for_config(&self.config);
        // Labels are unreadable at character resolution, so only shapes are drawn
        draw_background(&mut canvas);
        for vehicle in &self.vehicles {
            draw_vehicle_body(&mut canvas, vehicle);
            draw_vehicle_overlay(&mut canvas, vehicle);
        }

        println!("\n=== Camera Feed ===");
        println!(
            "Legend: o=Normal vehicle, W=Wrong-way vehicle, v/^=Heading, .=Trail, |=Centre line, :=Lane divider"
        );
        println!();
        print!("{}", canvas.render_to_string());
        println!();
    }
}

/// Local time-of-day label stamped on records
fn time_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
