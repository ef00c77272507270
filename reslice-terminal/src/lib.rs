/// Terminal front end for plane alignment: reports and ASCII previews
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use reslice_core::{Point3D, PointRotator, RotationExecutor, RotationRequest};
use std::io::{self, Write};

pub mod renderer;
pub mod report;

pub use renderer::{AsciiRenderer, Viewport};
pub use report::SolveReport;

const POINT_LABELS: [char; 3] = ['0', '1', '2'];

/// Side-by-side view of the picked triangle before and after rotation
pub struct Preview {
    before: [Point3D; 3],
    after: [Point3D; 3],
    width: usize,
    height: usize,
}

impl Preview {
    /// Rotate the picked points about their centroid, as the resampler
    /// would rotate the stack
    pub fn new(points: [Point3D; 3], request: &RotationRequest, width: usize, height: usize) -> Self {
        let mut rotator = PointRotator::about_centroid(points.to_vec());
        let after = match rotator.rotate(request) {
            Ok(rotated) => [rotated[0], rotated[1], rotated[2]],
            Err(never) => match never {},
        };
        Self {
            before: points,
            after,
            width,
            height,
        }
    }

    pub fn after(&self) -> &[Point3D; 3] {
        &self.after
    }

    fn panel(&self, triangle: &[Point3D; 3], viewport: &Viewport) -> AsciiRenderer {
        let mut renderer = AsciiRenderer::new(self.width, self.height);
        renderer.render_triangle(triangle, viewport);
        for (label, p) in POINT_LABELS.into_iter().zip(triangle) {
            renderer.plot_point(p, viewport, label);
        }
        renderer
    }

    pub fn render<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let all: Vec<Point3D> = self.before.iter().chain(&self.after).copied().collect();
        let viewport = Viewport::fit(&all, self.width, self.height);
        let left = self.panel(&self.before, &viewport);
        let right = self.panel(&self.after, &viewport);

        let facing = |t: &[Point3D; 3]| renderer::facing(t).unwrap_or(0.0);
        let title_left = format!("picked (face-on {:.2})", facing(&self.before));
        let title_right = format!("rotated (face-on {:.2})", facing(&self.after));

        writer.queue(SetForegroundColor(Color::Yellow))?;
        writer.queue(Print(format!(
            "{:<width$} | {}\n",
            title_left,
            title_right,
            width = left.width()
        )))?;
        writer.queue(ResetColor)?;

        for y in 0..self.height {
            left.draw_row(writer, y)?;
            writer.queue(Print(" | "))?;
            right.draw_row(writer, y)?;
            writer.queue(Print('\n'))?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reslice_core::RotationAngles;

    fn triangle() -> [Point3D; 3] {
        [
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(10.0, 0.0, 0.0),
            Point3D::new(0.0, 10.0, 0.0),
        ]
    }

    #[test]
    fn test_zero_rotation_keeps_triangle() {
        let preview = Preview::new(
            triangle(),
            &RotationRequest::new(RotationAngles::default()),
            20,
            10,
        );
        for (a, b) in triangle().iter().zip(preview.after()) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
            assert!((a.z - b.z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_render_writes_title_and_rows() {
        let preview = Preview::new(
            triangle(),
            &RotationRequest::new(RotationAngles::new(90.0, 0.0)),
            20,
            10,
        );
        let mut out = Vec::new();
        preview.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("picked (face-on 1.00)"));
        assert!(text.contains("rotated (face-on 0.00)"));
        assert_eq!(text.matches('\n').count(), 11);
    }
}
