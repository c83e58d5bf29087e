//! Scene rendering onto an abstract drawing surface
//!
//! The simulation never draws while it updates. Front-ends implement
//! [`Canvas`] and call the drawing functions here after each tick: the
//! headless binary rasterises to text, the Bevy UI replays onto gizmos, and
//! tests record commands in a [`DrawList`].

use super::types::{Direction, Point};
use super::vehicle::SimVehicle;
use super::world::SimWorld;

/// An sRGB colour with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

pub mod palette {
    use super::Rgba;

    pub const ROAD: Rgba = Rgba::rgb(31, 41, 55);
    pub const CENTRE_LINE: Rgba = Rgba::rgb(251, 191, 36);
    pub const LANE_DIVIDER: Rgba = Rgba::rgb(209, 213, 219);
    pub const ROAD_ARROW: Rgba = Rgba::rgba(255, 255, 255, 0.3);

    pub const NORMAL_BODY: Rgba = Rgba::rgb(59, 130, 246);
    pub const WRONG_WAY_BODY: Rgba = Rgba::rgb(239, 68, 68);
    pub const NORMAL_TRAIL: Rgba = Rgba::rgba(59, 130, 246, 0.2);
    pub const WRONG_WAY_TRAIL: Rgba = Rgba::rgba(239, 68, 68, 0.3);
    pub const NORMAL_BOX: Rgba = Rgba::rgb(16, 185, 129);
    pub const NORMAL_ARROW: Rgba = Rgba::rgb(147, 197, 253);
    pub const WRONG_WAY_ARROW: Rgba = Rgba::rgb(252, 165, 165);

    pub const WINDOW: Rgba = Rgba::rgb(255, 255, 255);
    pub const PLATE: Rgba = Rgba::rgb(254, 243, 199);
    pub const PLATE_TEXT: Rgba = Rgba::rgb(0, 0, 0);
    pub const LABEL_TEXT: Rgba = Rgba::rgb(255, 255, 255);
}

/// Road layout, in canvas units
pub const CENTRE_LINE_X: f32 = 350.0;
pub const LANE_DIVIDERS_X: [f32; 2] = [185.0, 485.0];
pub const DIVIDER_DASH: [f32; 2] = [20.0, 15.0];
pub const ROAD_ARROW_START_Y: f32 = 50.0;
pub const ROAD_ARROW_SPACING: f32 = 120.0;

/// A 2D drawing surface in canvas coordinates (origin top-left, y down)
pub trait Canvas {
    /// Logical width and height
    fn size(&self) -> (f32, f32);

    fn clear(&mut self, color: Rgba);

    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba);

    fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba, line_width: f32);

    /// A straight line, dashed when `dash` is `[on, off]`
    fn line(&mut self, from: Point, to: Point, color: Rgba, line_width: f32, dash: Option<[f32; 2]>);

    fn polyline(&mut self, points: &[Point], color: Rgba, line_width: f32);

    fn fill_triangle(&mut self, points: [Point; 3], color: Rgba);

    /// Text with its baseline starting at `at`
    fn text(&mut self, at: Point, text: &str, color: Rgba, font_size: f32);
}

/// Road surface, centre line, lane dividers and direction arrows
pub fn draw_background(canvas: &mut dyn Canvas) {
    let (width, height) = canvas.size();
    canvas.clear(palette::ROAD);
    canvas.fill_rect(Point::new(0.0, 0.0), width, height, palette::ROAD);

    canvas.line(
        Point::new(CENTRE_LINE_X, 0.0),
        Point::new(CENTRE_LINE_X, height),
        palette::CENTRE_LINE,
        4.0,
        None,
    );

    for x in LANE_DIVIDERS_X {
        canvas.line(
            Point::new(x, 0.0),
            Point::new(x, height),
            palette::LANE_DIVIDER,
            2.0,
            Some(DIVIDER_DASH),
        );
    }

    let mut y = ROAD_ARROW_START_Y;
    while y < height {
        draw_road_arrow(canvas, Point::new(LANE_DIVIDERS_X[0], y), Direction::Down);
        draw_road_arrow(canvas, Point::new(LANE_DIVIDERS_X[1], y), Direction::Up);
        y += ROAD_ARROW_SPACING;
    }
}

fn draw_road_arrow(canvas: &mut dyn Canvas, at: Point, direction: Direction) {
    let points = match direction {
        Direction::Down => [at.offset(0.0, 20.0), at.offset(-15.0, 0.0), at.offset(15.0, 0.0)],
        Direction::Up => [at, at.offset(-15.0, 20.0), at.offset(15.0, 20.0)],
    };
    canvas.fill_triangle(points, palette::ROAD_ARROW);
}

fn body_color(vehicle: &SimVehicle) -> Rgba {
    if vehicle.is_wrong_way {
        palette::WRONG_WAY_BODY
    } else {
        palette::NORMAL_BODY
    }
}

fn status_color(vehicle: &SimVehicle) -> Rgba {
    if vehicle.is_wrong_way {
        palette::WRONG_WAY_BODY
    } else {
        palette::NORMAL_BOX
    }
}

/// Trail, bounding box and heading arrow
pub fn draw_vehicle_overlay(canvas: &mut dyn Canvas, vehicle: &SimVehicle) {
    let half_w = vehicle.width / 2.0;
    let half_h = vehicle.height / 2.0;

    if vehicle.trajectory.len() > 1 {
        let trail: Vec<Point> = vehicle
            .trajectory
            .iter()
            .map(|p| p.offset(half_w, half_h))
            .collect();
        let color = if vehicle.is_wrong_way {
            palette::WRONG_WAY_TRAIL
        } else {
            palette::NORMAL_TRAIL
        };
        canvas.polyline(&trail, color, 2.0);
    }

    canvas.stroke_rect(
        vehicle.position.offset(-5.0, -5.0),
        vehicle.width + 10.0,
        vehicle.height + 10.0,
        status_color(vehicle),
        3.0,
    );

    let c = vehicle.center();
    let points = match vehicle.direction {
        Direction::Down => [c.offset(0.0, 10.0), c.offset(-8.0, -5.0), c.offset(8.0, -5.0)],
        Direction::Up => [c.offset(0.0, -10.0), c.offset(-8.0, 5.0), c.offset(8.0, 5.0)],
    };
    let arrow_color = if vehicle.is_wrong_way {
        palette::WRONG_WAY_ARROW
    } else {
        palette::NORMAL_ARROW
    };
    canvas.fill_triangle(points, arrow_color);
}

/// Body, windows and (if read) the plate strip
pub fn draw_vehicle_body(canvas: &mut dyn Canvas, vehicle: &SimVehicle) {
    let p = vehicle.position;
    canvas.fill_rect(p, vehicle.width, vehicle.height, body_color(vehicle));
    canvas.fill_rect(p.offset(5.0, 10.0), 30.0, 15.0, palette::WINDOW);
    canvas.fill_rect(p.offset(5.0, 35.0), 30.0, 15.0, palette::WINDOW);

    if vehicle.plate_recognized {
        canvas.fill_rect(p.offset(5.0, vehicle.height - 12.0), 30.0, 8.0, palette::PLATE);
        canvas.text(
            p.offset(7.0, vehicle.height - 5.0),
            &vehicle.license_plate,
            palette::PLATE_TEXT,
            6.0,
        );
    }
}

/// Status banner above the bounding box
pub fn draw_vehicle_label(canvas: &mut dyn Canvas, vehicle: &SimVehicle) {
    let p = vehicle.position;
    canvas.fill_rect(p.offset(-5.0, -50.0), 150.0, 40.0, status_color(vehicle));
    canvas.text(p.offset(0.0, -33.0), &vehicle.banner_label(), palette::LABEL_TEXT, 11.0);
    canvas.text(p.offset(0.0, -18.0), &vehicle.identity_label(), palette::LABEL_TEXT, 10.0);
    canvas.text(
        p.offset(0.0, -8.0),
        &vehicle.plate_confidence_label(),
        palette::LABEL_TEXT,
        10.0,
    );
}

/// Draw one full frame: background, then every vehicle in spawn order.
/// The heading arrow lies inside the body, so the body is drawn first.
pub fn draw_scene(world: &SimWorld, canvas: &mut dyn Canvas) {
    draw_background(canvas);
    for vehicle in &world.vehicles {
        draw_vehicle_body(canvas, vehicle);
        draw_vehicle_overlay(canvas, vehicle);
        draw_vehicle_label(canvas, vehicle);
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect { origin: Point, width: f32, height: f32, color: Rgba },
    StrokeRect { origin: Point, width: f32, height: f32, color: Rgba, line_width: f32 },
    Line { from: Point, to: Point, color: Rgba, line_width: f32, dash: Option<[f32; 2]> },
    Polyline { points: Vec<Point>, color: Rgba, line_width: f32 },
    FillTriangle { points: [Point; 3], color: Rgba },
    Text { at: Point, text: String, color: Rgba, font_size: f32 },
}

/// A canvas that records draw calls instead of drawing
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f32,
    height: f32,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count_where(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for DrawList {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, width, height, color });
    }

    fn stroke_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            origin,
            width,
            height,
            color,
            line_width,
        });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, line_width: f32, dash: Option<[f32; 2]>) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            line_width,
            dash,
        });
    }

    fn polyline(&mut self, points: &[Point], color: Rgba, line_width: f32) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_triangle(&mut self, points: [Point; 3], color: Rgba) {
        self.commands.push(DrawCommand::FillTriangle { points, color });
    }

    fn text(&mut self, at: Point, text: &str, color: Rgba, font_size: f32) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color,
            font_size,
        });
    }
}
