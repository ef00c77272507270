/// Hand-off of the solved rotation to a resampling backend
use nalgebra::Point3;

use crate::geometry::{Point3D, RotationAngles};

/// Interpolation schemes offered by the TransformJ rotate dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    NearestNeighbor,
    Linear,
    CubicConvolution,
    CubicBSpline,
    CubicOMoms,
    #[default]
    QuinticBSpline,
}

impl Interpolation {
    pub const ALL: [Interpolation; 6] = [
        Interpolation::NearestNeighbor,
        Interpolation::Linear,
        Interpolation::CubicConvolution,
        Interpolation::CubicBSpline,
        Interpolation::CubicOMoms,
        Interpolation::QuinticBSpline,
    ];

    /// Look up a scheme by its dialog label, ignoring ASCII case
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interpolation::NearestNeighbor => "Nearest Neighbor",
            Interpolation::Linear => "Linear",
            Interpolation::CubicConvolution => "Cubic Convolution",
            Interpolation::CubicBSpline => "Cubic B-Spline",
            Interpolation::CubicOMoms => "Cubic O-MOMS",
            Interpolation::QuinticBSpline => "Quintic B-Spline",
        }
    }
}

/// Everything a resampler needs to re-orient a volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationRequest {
    pub angles: RotationAngles,
    pub interpolation: Interpolation,
    pub background: f64,
    /// Grow the output volume so nothing is cropped
    pub adjust: bool,
}

impl RotationRequest {
    pub fn new(angles: RotationAngles) -> Self {
        Self {
            angles,
            interpolation: Interpolation::default(),
            background: 0.0,
            adjust: true,
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_background(mut self, background: f64) -> Self {
        self.background = background;
        self
    }

    pub fn with_adjust(mut self, adjust: bool) -> Self {
        self.adjust = adjust;
        self
    }

    /// Option string for `IJ.run("TransformJ Rotate", ...)`
    pub fn transformj_options(&self) -> String {
        let mut options = format!(
            "z-angle={:?} y-angle={:?} x-angle={:?} interpolation=[{}] background={:?}",
            RotationAngles::Z,
            self.angles.y,
            self.angles.x,
            self.interpolation.label(),
            self.background,
        );
        if self.adjust {
            options.push_str(" adjust");
        }
        options
    }
}

/// A backend that applies a rotation to some volume-like input
pub trait RotationExecutor {
    type Output;
    type Error;

    fn rotate(&mut self, request: &RotationRequest) -> Result<Self::Output, Self::Error>;
}

/// Rotates a point set about a fixed centre.
/// Interpolation and background only matter for voxel data and are ignored.
pub struct PointRotator {
    points: Vec<Point3D>,
    center: Point3<f64>,
}

impl PointRotator {
    pub fn new(points: Vec<Point3D>, center: Point3D) -> Self {
        Self {
            points,
            center: center.to_point(),
        }
    }

    /// Rotate about the centroid of the points
    pub fn about_centroid(points: Vec<Point3D>) -> Self {
        let center = centroid(&points);
        Self::new(points, center)
    }
}

impl RotationExecutor for PointRotator {
    type Output = Vec<Point3D>;
    type Error = std::convert::Infallible;

    fn rotate(&mut self, request: &RotationRequest) -> Result<Vec<Point3D>, Self::Error> {
        let rotation = request.angles.rotation();
        Ok(self
            .points
            .iter()
            .map(|p| {
                let local = p.to_point() - self.center;
                Point3D::from(self.center + rotation * local)
            })
            .collect())
    }
}

pub fn centroid(points: &[Point3D]) -> Point3D {
    if points.is_empty() {
        return Point3D::new(0.0, 0.0, 0.0);
    }
    let n = points.len() as f64;
    let (sx, sy, sz) = points
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
    Point3D::new(sx / n, sy / n, sz / n)
}
