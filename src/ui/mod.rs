//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI ticks `SimWorld` once per frame and renders it in 2D.

mod canvas;
mod components;
mod hud;
mod input;
mod sync;
mod world;

use bevy::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

pub use canvas::GizmoCanvas;
pub use components::{
    canvas_to_world, EntityMappings, ExportSettings, LoopResource, SimWorldResource,
    WINDOW_HEIGHT, WINDOW_WIDTH,
};

use crate::simulation::SimWorld;
use hud::{setup_hud, update_panel_text, update_stat_text};
use input::handle_input;
use sync::{draw_overlays, sync_vehicles, tick_simulation};
use world::{setup_world, BACKDROP};

/// Plugin to register all UI systems
pub struct WrongWayUIPlugin {
    /// The world to run, usually freshly built by `SimWorld::with_config`
    pub world: SimWorld,
    /// Directory the detections log is exported to
    pub export_dir: PathBuf,
}

impl Plugin for WrongWayUIPlugin {
    fn build(&self, app: &mut App) {
        let world = self.world.clone();
        let loop_ctx = world.new_context(Instant::now());

        app.insert_resource(SimWorldResource(world))
            .insert_resource(LoopResource(loop_ctx))
            .insert_resource(ExportSettings {
                dir: self.export_dir.clone(),
            })
            .insert_resource(ClearColor(BACKDROP))
            .init_resource::<EntityMappings>()
            .add_systems(Startup, (setup_world, setup_hud))
            .add_systems(
                Update,
                (
                    handle_input,
                    tick_simulation.after(handle_input),
                    sync_vehicles.after(tick_simulation),
                    draw_overlays.after(tick_simulation),
                    update_stat_text.after(tick_simulation),
                    update_panel_text.after(tick_simulation),
                ),
            );
    }
}
