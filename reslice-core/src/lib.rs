/// Reslice Core Library - plane alignment for reslicing 3D stacks
///
/// Given three points picked in a stack, computes the rotation about x and y
/// that brings the plane through them onto the stack axes, and describes that
/// rotation for an external resampler. Also reads point lists and line-ROI
/// CSV exports.

pub mod error;
pub mod geometry;
pub mod points;
pub mod roi_csv;
pub mod solver;
pub mod transform;

// Re-export commonly used types
pub use error::{ResliceError, Result};
pub use geometry::{Point3D, RotationAngles, UnitVector3D};
pub use solver::{
    align_plane, compute_axis_angles, compute_plane_normal, compute_rotation_angles,
    solve_from_points, solve_plane_alignment, AxisAngles, PlaneAlignment, SignCase,
};
pub use transform::{Interpolation, PointRotator, RotationExecutor, RotationRequest};
