//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

use super::canvas::{to_color, GizmoCanvas};
use super::components::{
    canvas_to_world, EntityMappings, LoopResource, SimWorldResource, VehicleLink,
};
use crate::simulation::render::{draw_background, draw_vehicle_overlay, palette};
use crate::simulation::{SimVehicle, VehicleId};

const VEHICLE_Z: f32 = 1.0;

/// System to run one simulation tick per frame
pub fn tick_simulation(
    mut sim_world: ResMut<SimWorldResource>,
    mut loop_ctx: ResMut<LoopResource>,
) {
    sim_world.0.tick(&mut loop_ctx.0, Instant::now());
}

/// System to draw road markings, trails, bounding boxes and heading arrows
pub fn draw_overlays(sim_world: Res<SimWorldResource>, mut gizmos: Gizmos) {
    let world = &sim_world.0;
    let mut canvas = GizmoCanvas::new(
        &mut gizmos,
        world.config.canvas_width,
        world.config.canvas_height,
    );

    draw_background(&mut canvas);
    for vehicle in &world.vehicles {
        draw_vehicle_overlay(&mut canvas, vehicle);
    }
}

/// System to sync vehicle sprites from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(Entity, &VehicleLink, &mut Transform)>,
) {
    let world = &sim_world.0;

    // Update existing vehicles and track which ones still exist
    let mut existing: HashSet<VehicleId> = HashSet::new();

    for (entity, link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = world.vehicle(link.0) {
            existing.insert(link.0);
            transform.translation = canvas_to_world(vehicle.center()).extend(VEHICLE_Z);
        } else {
            // Vehicle left the feed or the world was reset
            commands.entity(entity).despawn();
            mappings.vehicles.remove(&link.0);
        }
    }

    for vehicle in &world.vehicles {
        if !existing.contains(&vehicle.id) {
            let entity = spawn_vehicle_visual(&mut commands, vehicle);
            mappings.vehicles.insert(vehicle.id, entity);
        }
    }
}

/// Spawn the body sprite with its windows, plate and status banner.
/// Child offsets are relative to the body centre.
fn spawn_vehicle_visual(commands: &mut Commands, vehicle: &SimVehicle) -> Entity {
    let (body, banner) = if vehicle.is_wrong_way {
        (palette::WRONG_WAY_BODY, palette::WRONG_WAY_BODY)
    } else {
        (palette::NORMAL_BODY, palette::NORMAL_BOX)
    };
    let window = to_color(palette::WINDOW);
    let label = to_color(palette::LABEL_TEXT);

    commands
        .spawn((
            VehicleLink(vehicle.id),
            Sprite::from_color(to_color(body), Vec2::new(vehicle.width, vehicle.height)),
            Transform::from_translation(canvas_to_world(vehicle.center()).extend(VEHICLE_Z)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite::from_color(window, Vec2::new(30.0, 15.0)),
                Transform::from_xyz(0.0, 12.5, 0.1),
            ));
            parent.spawn((
                Sprite::from_color(window, Vec2::new(30.0, 15.0)),
                Transform::from_xyz(0.0, -12.5, 0.1),
            ));

            if vehicle.plate_recognized {
                parent.spawn((
                    Sprite::from_color(to_color(palette::PLATE), Vec2::new(30.0, 8.0)),
                    Transform::from_xyz(0.0, -22.0, 0.1),
                ));
                parent.spawn((
                    Text2d::new(vehicle.license_plate.clone()),
                    TextFont {
                        font_size: 6.0,
                        ..default()
                    },
                    TextColor(to_color(palette::PLATE_TEXT)),
                    Transform::from_xyz(0.0, -22.0, 0.2),
                ));
            }

            parent.spawn((
                Sprite::from_color(to_color(banner), Vec2::new(150.0, 40.0)),
                Transform::from_xyz(50.0, 60.0, 0.1),
            ));
            for (text, size, y) in [
                (vehicle.banner_label(), 11.0, 69.0),
                (vehicle.identity_label(), 10.0, 56.0),
                (vehicle.plate_confidence_label(), 10.0, 45.0),
            ] {
                parent.spawn((
                    Text2d::new(text),
                    TextFont {
                        font_size: size,
                        ..default()
                    },
                    TextColor(label),
                    Transform::from_xyz(50.0, y, 0.2),
                ));
            }
        })
        .id()
}
