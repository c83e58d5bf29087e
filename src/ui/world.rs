//! World setup systems for the camera and the road surface

use bevy::prelude::*;

use super::canvas::to_color;
use super::components::{canvas_to_world, MainCamera, RoadSurface, SimWorldResource};
use crate::simulation::render::palette;
use crate::simulation::Point;

/// Background around the camera feed
pub const BACKDROP: Color = Color::srgb(0.07, 0.09, 0.15);

/// System to setup the 2D camera and the road the vehicles drive on
pub fn setup_world(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    commands.spawn((MainCamera, Camera2d));

    let config = &sim_world.0.config;
    let center = canvas_to_world(Point::new(
        config.canvas_width / 2.0,
        config.canvas_height / 2.0,
    ));

    commands.spawn((
        RoadSurface,
        Sprite::from_color(
            to_color(palette::ROAD),
            Vec2::new(config.canvas_width, config.canvas_height),
        ),
        Transform::from_translation(center.extend(0.0)),
    ));
}
