//! A `Canvas` backed by Bevy gizmos
//!
//! Gizmos only draw outlines, so fills become outlines here; filled shapes
//! that matter (vehicle bodies, the road) are sprites managed elsewhere.

use bevy::math::Isometry2d;
use bevy::prelude::*;

use super::components::canvas_to_world;
use crate::simulation::{Canvas, Point, Rgba};

pub struct GizmoCanvas<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    width: f32,
    height: f32,
}

impl<'a, 'w, 's> GizmoCanvas<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, width: f32, height: f32) -> Self {
        Self {
            gizmos,
            width,
            height,
        }
    }

    fn rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba) {
        let center = canvas_to_world(origin.offset(width / 2.0, height / 2.0));
        self.gizmos.rect_2d(
            Isometry2d::from_translation(center),
            Vec2::new(width, height),
            to_color(color),
        );
    }
}

pub fn to_color(color: Rgba) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, (color.a * 255.0).round() as u8)
}

impl Canvas for GizmoCanvas<'_, '_, '_> {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    // The road sprite and clear colour already cover this
    fn clear(&mut self, _color: Rgba) {}

    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba) {
        self.rect(origin, width, height, color);
    }

    fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba, _line_width: f32) {
        self.rect(origin, width, height, color);
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, _line_width: f32, dash: Option<[f32; 2]>) {
        let color = to_color(color);
        let start = canvas_to_world(from);
        let end = canvas_to_world(to);

        let Some([on, off]) = dash else {
            self.gizmos.line_2d(start, end, color);
            return;
        };

        let length = start.distance(end);
        if length <= f32::EPSILON {
            return;
        }
        let dir = (end - start) / length;
        let mut travelled = 0.0;
        while travelled < length {
            let dash_end = (travelled + on).min(length);
            self.gizmos
                .line_2d(start + dir * travelled, start + dir * dash_end, color);
            travelled += on + off;
        }
    }

    fn polyline(&mut self, points: &[Point], color: Rgba, _line_width: f32) {
        self.gizmos
            .linestrip_2d(points.iter().map(|p| canvas_to_world(*p)), to_color(color));
    }

    fn fill_triangle(&mut self, points: [Point; 3], color: Rgba) {
        let [a, b, c] = points.map(canvas_to_world);
        self.gizmos.linestrip_2d([a, b, c, a], to_color(color));
    }

    // Labels are Text2d entities attached to vehicle sprites
    fn text(&mut self, _at: Point, _text: &str, _color: Rgba, _font_size: f32) {}
}
