//! Input handling systems

use bevy::prelude::*;
use std::time::Instant;

use super::components::{ExportSettings, LoopResource, SimWorldResource};
use crate::simulation::export_detections;

/// Handle the dashboard controls
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut loop_ctx: ResMut<LoopResource>,
    export: Res<ExportSettings>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    if keyboard.just_pressed(KeyCode::Space) {
        let running = loop_ctx.0.toggle(Instant::now());
        bevy::log::info!("Simulation {}", if running { "started" } else { "paused" });
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        sim_world.0.reset(&mut loop_ctx.0);
    }

    if keyboard.just_pressed(KeyCode::KeyE) {
        if sim_world.0.recent_detections.is_empty() {
            bevy::log::warn!("No detections to export yet");
        } else if let Err(err) = export_detections(&sim_world.0, &export.dir) {
            bevy::log::error!("Export failed: {err:#}");
        }
    }
}
