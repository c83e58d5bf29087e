//! Character-cell canvas for the headless terminal map

use super::config::SimConfig;
use super::render::{palette, Canvas, Rgba};
use super::types::Point;

/// Canvas units covered by one character cell
const CELL_WIDTH: f32 = 10.0;
const CELL_HEIGHT: f32 = 20.0;

/// Rasterises draw calls into a grid of characters.
///
/// Only shapes that read well as text are kept: vehicle bodies, heading
/// arrows, trails and road markings. Text and outlines are dropped.
pub struct AsciiCanvas {
    width: f32,
    height: f32,
    cols: usize,
    rows: usize,
    grid: Vec<Vec<char>>,
}

impl AsciiCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        let cols = (width / CELL_WIDTH).ceil().max(1.0) as usize;
        let rows = (height / CELL_HEIGHT).ceil().max(1.0) as usize;
        Self {
            width,
            height,
            cols,
            rows,
            grid: vec![vec![' '; cols]; rows],
        }
    }

    pub fn for_config(config: &SimConfig) -> Self {
        Self::new(config.canvas_width, config.canvas_height)
    }

    /// Character at a cell, if the cell exists
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn render_to_string(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in &self.grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    fn to_cell(&self, p: Point) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        let col = ((p.x / CELL_WIDTH) as usize).min(self.cols - 1);
        let row = ((p.y / CELL_HEIGHT) as usize).min(self.rows - 1);
        Some((row, col))
    }

    fn plot(&mut self, p: Point, ch: char, overwrite: bool) {
        if let Some((row, col)) = self.to_cell(p) {
            let cell = &mut self.grid[row][col];
            if overwrite || *cell == ' ' {
                *cell = ch;
            }
        }
    }

    /// Walk a segment in half-cell steps, plotting where `visible` says so
    fn trace(&mut self, from: Point, to: Point, ch: char, dash: Option<[f32; 2]>) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        let step = CELL_WIDTH.min(CELL_HEIGHT) / 2.0;
        let steps = (length / step).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let travelled = length * i as f32 / steps as f32;
            if let Some([on, off]) = dash {
                if travelled % (on + off) >= on {
                    continue;
                }
            }
            let t = if length > 0.0 { travelled / length } else { 0.0 };
            self.plot(Point::new(from.x + dx * t, from.y + dy * t), ch, false);
        }
    }
}

impl Canvas for AsciiCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, _color: Rgba) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    fn fill_rect(&mut self, origin: Point, width: f32, height: f32, color: Rgba) {
        let ch = if color == palette::NORMAL_BODY {
            'o'
        } else if color == palette::WRONG_WAY_BODY {
            'W'
        } else {
            return;
        };

        for row in 0..self.rows {
            for col in 0..self.cols {
                let cx = (col as f32 + 0.5) * CELL_WIDTH;
                let cy = (row as f32 + 0.5) * CELL_HEIGHT;
                if cx >= origin.x && cx < origin.x + width && cy >= origin.y && cy < origin.y + height {
                    self.grid[row][col] = ch;
                }
            }
        }
    }

    fn stroke_rect(&mut self, _origin: Point, _width: f32, _height: f32, _color: Rgba, _line_width: f32) {}

    fn line(&mut self, from: Point, to: Point, color: Rgba, _line_width: f32, dash: Option<[f32; 2]>) {
        let ch = if color == palette::CENTRE_LINE {
            '|'
        } else if dash.is_some() {
            ':'
        } else {
            '-'
        };
        self.trace(from, to, ch, dash);
    }

    fn polyline(&mut self, points: &[Point], _color: Rgba, _line_width: f32) {
        for pair in points.windows(2) {
            self.trace(pair[0], pair[1], '.', None);
        }
    }

    fn fill_triangle(&mut self, points: [Point; 3], color: Rgba) {
        // The first vertex is the tip
        let tip = points[0];
        let base_y = (points[1].y + points[2].y) / 2.0;
        let centroid = Point::new(
            (points[0].x + points[1].x + points[2].x) / 3.0,
            (points[0].y + points[1].y + points[2].y) / 3.0,
        );
        let ch = if tip.y > base_y { 'v' } else { '^' };
        // Heading arrows sit on top of vehicle bodies, road arrows only on empty road
        let overwrite = color != palette::ROAD_ARROW;
        self.plot(centroid, ch, overwrite);
    }

    fn text(&mut self, _at: Point, _text: &str, _color: Rgba, _font_size: f32) {}
}
