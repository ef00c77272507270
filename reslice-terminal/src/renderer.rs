/// ASCII rasterizer for previewing a picked plane in the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use reslice_core::{compute_plane_normal, Point3D};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Orthographic view down the stack's z axis: x to the right, y downwards
/// like image rows. One viewport is shared by every panel so they compare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin: Point2<f64>,
    scale: f64,
}

impl Viewport {
    /// Fit all points inside a `width` x `height` character grid
    pub fn fit(points: &[Point3D], width: usize, height: usize) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if points.is_empty() {
            return Self {
                origin: Point2::origin(),
                scale: 1.0,
            };
        }

        let span_x = (max_x - min_x) * CELL_ASPECT;
        let span_y = max_y - min_y;
        let cols = width.saturating_sub(1).max(1) as f64;
        let rows = height.saturating_sub(1).max(1) as f64;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (cols / span_x).min(rows / span_y),
            (true, false) => cols / span_x,
            (false, true) => rows / span_y,
            (false, false) => 1.0,
        };

        Self {
            origin: Point2::new(min_x, min_y),
            scale,
        }
    }

    pub fn project(&self, p: &Point3D) -> (f64, f64, f64) {
        (
            (p.x - self.origin.x) * self.scale * CELL_ASPECT,
            (p.y - self.origin.y) * self.scale,
            p.z,
        )
    }
}

/// How squarely a triangle faces the viewer, in [0, 1]
pub fn facing(triangle: &[Point3D; 3]) -> Option<f64> {
    compute_plane_normal(triangle[0], triangle[1], triangle[2])
        .ok()
        .map(|n| n.z().abs())
}

/// ASCII renderer for one preview panel
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    /// Panics if `width * height` overflows; callers bound the panel size
    pub fn new(width: usize, height: usize) -> Self {
        let size = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("panel {}x{} is too large", width, height));
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// Fill a triangle, shaded by how face-on it is. Edge-on triangles
    /// leave no fill.
    pub fn render_triangle(&mut self, triangle: &[Point3D; 3], viewport: &Viewport) {
        let Some(brightness) = facing(triangle) else {
            return;
        };

        // Map brightness to character, never blank
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        let coords = triangle.map(|p| viewport.project(&p));
        self.rasterize_triangle(&coords, character);
    }

    /// Mark a picked point with a label, above any fill
    pub fn plot_point(&mut self, point: &Point3D, viewport: &Viewport, label: char) {
        let (x, y, _) = viewport.project(point);
        let (x, y) = (x.round(), y.round());
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= self.height as f64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.depth_buffer[idx] = f64::NEG_INFINITY;
        self.char_buffer[idx] = label;
    }

    fn rasterize_triangle(&mut self, coords: &[(f64, f64, f64); 3], character: char) {
        let [v0, v1, v2] = *coords;

        // Bounding box clipped to the panel
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as i64;
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.width as i64 - 1);
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as i64;
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64, y as f64);
                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    return;
                };
                // Small slack so pixel centres on an edge are kept
                if w0 >= -1e-9 && w1 >= -1e-9 && w2 >= -1e-9 {
                    let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                    let idx = y as usize * self.width + x as usize;
                    if depth < self.depth_buffer[idx] {
                        self.depth_buffer[idx] = depth;
                        self.char_buffer[idx] = character;
                    }
                }
            }
        }
    }

    /// Queue one row of the panel, colored by intensity
    pub fn draw_row<W: Write>(&self, writer: &mut W, y: usize) -> std::io::Result<()> {
        for x in 0..self.width {
            let c = self.char_at(x, y);
            let color = match c {
                ' ' | '.' | ':' => Color::DarkGrey,
                '-' | '=' => Color::Grey,
                '+' | '*' => Color::White,
                '#' | '%' | '@' => Color::Cyan,
                _ => Color::Yellow,
            };
            writer.queue(SetForegroundColor(color))?;
            writer.queue(Print(c))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            self.draw_row(writer, y)?;
            writer.queue(Print('\n'))?;
        }
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-12 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
