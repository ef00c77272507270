/// Plane alignment: three picked points to the x/y rotation that brings their plane onto the stack axes
use log::{debug, info, warn};

use crate::error::{ResliceError, Result};
use crate::geometry::{Point3D, RotationAngles, UnitVector3D};

/// Cross products shorter than this fraction of `|v1| * |v2|` count as collinear
pub const COLLINEAR_EPSILON: f64 = 1e-10;

/// How far past ±1 an arcsine argument may drift before it is an error
pub const ASIN_TOLERANCE: f64 = 1e-9;

/// Unit normal of the plane through three points.
///
/// The normal is `(p1 - p0) × (p2 - p0)`, so (0,0,0), (1,0,0), (0,1,0)
/// gives (0,0,1). Swapping `p1` and `p2` flips its sign.
pub fn compute_plane_normal(p0: Point3D, p1: Point3D, p2: Point3D) -> Result<UnitVector3D> {
    if !(p0.is_finite() && p1.is_finite() && p2.is_finite()) {
        return Err(ResliceError::DegenerateInput);
    }

    let v1 = p1.to_point() - p0.to_point();
    let v2 = p2.to_point() - p0.to_point();
    let normal = v1.cross(&v2);

    let scale = v1.norm() * v2.norm();
    if scale == 0.0 || normal.norm() <= COLLINEAR_EPSILON * scale {
        return Err(ResliceError::DegenerateInput);
    }

    let unit = UnitVector3D::try_new(normal).ok_or(ResliceError::DegenerateInput)?;
    debug!(
        "plane normal ({:.6}, {:.6}, {:.6})",
        unit.x(),
        unit.y(),
        unit.z()
    );
    Ok(unit)
}

/// Angles (degrees) between the plane normal and the xz- and yz-planes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngles {
    pub xz: f64,
    pub yz: f64,
}

/// `xz = asin(n.y / |n|)`, `yz = asin(n.x / |n|)`, in degrees.
///
/// The division by `|n|` is kept even though `n` is unit length; it absorbs
/// drift in the stored components.
pub fn compute_axis_angles(normal: &UnitVector3D) -> Result<AxisAngles> {
    let norm = normal.norm();
    let xz = checked_asin('y', normal.y() / norm)?.to_degrees();
    let yz = checked_asin('x', normal.x() / norm)?.to_degrees();
    debug!("xz-angle {:.6} deg, yz-angle {:.6} deg", xz, yz);
    Ok(AxisAngles { xz, yz })
}

fn checked_asin(component: char, value: f64) -> Result<f64> {
    if value.is_nan() || value.abs() > 1.0 + ASIN_TOLERANCE {
        return Err(ResliceError::NumericRange { component, value });
    }
    if value.abs() > 1.0 {
        warn!(
            "clamping asin argument for {} component from {:e}",
            component, value
        );
        return Ok(value.clamp(-1.0, 1.0).asin());
    }
    Ok(value.asin())
}

/// Sign of one normal component. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    Same,
    Opposite,
}

impl Agreement {
    pub fn between(a: Sign, b: Sign) -> Self {
        if a == b {
            Agreement::Same
        } else {
            Agreement::Opposite
        }
    }
}

/// The sign combination of a normal's components, which selects the
/// direction of each rotation.
///
/// | pair  | agreement | rotation          |
/// |-------|-----------|-------------------|
/// | x, z  | opposite  | about y = +\|yz\| |
/// | x, z  | same      | about y = -\|yz\| |
/// | y, z  | same      | about x = +\|xz\| |
/// | y, z  | opposite  | about x = -\|xz\| |
///
/// The resampler depends on these exact signs, not just the magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignCase {
    pub x: Sign,
    pub y: Sign,
    pub z: Sign,
}

impl SignCase {
    pub fn of(normal: &UnitVector3D) -> Self {
        Self {
            x: Sign::of(normal.x()),
            y: Sign::of(normal.y()),
            z: Sign::of(normal.z()),
        }
    }

    pub fn xz(&self) -> Agreement {
        Agreement::between(self.x, self.z)
    }

    pub fn yz(&self) -> Agreement {
        Agreement::between(self.y, self.z)
    }

    pub fn rotation_about_y(&self, yz_angle: f64) -> f64 {
        signed_by(yz_angle, self.xz() == Agreement::Opposite)
    }

    pub fn rotation_about_x(&self, xz_angle: f64) -> f64 {
        signed_by(xz_angle, self.yz() == Agreement::Same)
    }
}

fn signed_by(angle: f64, positive: bool) -> f64 {
    match (positive, angle >= 0.0) {
        (true, true) => angle,
        (true, false) => -angle,
        (false, true) => -angle,
        (false, false) => angle,
    }
}

pub fn compute_rotation_angles(normal: &UnitVector3D, angles: AxisAngles) -> RotationAngles {
    let case = SignCase::of(normal);
    RotationAngles::new(
        case.rotation_about_x(angles.xz),
        case.rotation_about_y(angles.yz),
    )
}

/// Every intermediate of one solve, for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAlignment {
    pub normal: UnitVector3D,
    pub axis_angles: AxisAngles,
    pub rotation: RotationAngles,
}

pub fn align_plane(p0: Point3D, p1: Point3D, p2: Point3D) -> Result<PlaneAlignment> {
    let normal = compute_plane_normal(p0, p1, p2)?;
    let axis_angles = compute_axis_angles(&normal)?;
    let rotation = compute_rotation_angles(&normal, axis_angles);
    info!(
        "Rotating by {:.2} deg about y and {:.2} deg about x",
        rotation.y, rotation.x
    );
    Ok(PlaneAlignment {
        normal,
        axis_angles,
        rotation,
    })
}

/// Runs `compute_plane_normal`, `compute_axis_angles` and
/// `compute_rotation_angles` in turn. Pure: same points, same angles.
pub fn solve_plane_alignment(p0: Point3D, p1: Point3D, p2: Point3D) -> Result<RotationAngles> {
    align_plane(p0, p1, p2).map(|a| a.rotation)
}

/// Align using the first three points of an ordered sequence
pub fn solve_from_points(points: &[Point3D]) -> Result<PlaneAlignment> {
    match points {
        [p0, p1, p2, rest @ ..] => {
            if !rest.is_empty() {
                warn!(
                    "{} points supplied; using the first 3 and ignoring {}",
                    points.len(),
                    rest.len()
                );
            }
            align_plane(*p0, *p1, *p2)
        }
        _ => Err(ResliceError::InsufficientPoints {
            found: points.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    fn unit(x: f64, y: f64, z: f64) -> UnitVector3D {
        UnitVector3D::try_new(Vector3::new(x, y, z)).unwrap()
    }

    #[test]
    fn test_xy_plane_normal_points_up() {
        let n = compute_plane_normal(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(n.to_array(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let err = compute_plane_normal(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
        assert_eq!(err, Err(ResliceError::DegenerateInput));
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let a = p(4.0, 5.0, 6.0);
        assert_eq!(
            compute_plane_normal(a, a, p(1.0, 0.0, 0.0)),
            Err(ResliceError::DegenerateInput)
        );
    }

    #[test]
    fn test_nearly_collinear_large_coordinates_are_degenerate() {
        let err = compute_plane_normal(
            p(1e6, 1e6, 1e6),
            p(2e6, 2e6, 2e6),
            p(3e6, 3e6, 3e6 + 1e-6),
        );
        assert_eq!(err, Err(ResliceError::DegenerateInput));
    }

    #[test]
    fn test_non_finite_points_are_degenerate() {
        let err = compute_plane_normal(p(f64::NAN, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        assert_eq!(err, Err(ResliceError::DegenerateInput));
    }

    #[test]
    fn test_axis_angles_of_tilted_normal() {
        let n = unit(0.5, 0.0, 0.75f64.sqrt());
        let angles = compute_axis_angles(&n).unwrap();
        assert_relative_eq!(angles.xz, 0.0, epsilon = 1e-12);
        assert_relative_eq!(angles.yz, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_axis_angles_reject_nan_normal() {
        let n = UnitVector3D::new_unchecked(Vector3::new(f64::NAN, 0.0, 1.0));
        assert!(matches!(
            compute_axis_angles(&n),
            Err(ResliceError::NumericRange { component: 'y', .. })
        ));
    }

    #[test]
    fn test_checked_asin_clamps_small_overshoot() {
        let v = checked_asin('x', 1.0 + 1e-12).unwrap();
        assert_relative_eq!(v, std::f64::consts::FRAC_PI_2, epsilon = 1e-15);
        let v = checked_asin('x', -1.0 - 1e-12).unwrap();
        assert_relative_eq!(v, -std::f64::consts::FRAC_PI_2, epsilon = 1e-15);
    }

    #[test]
    fn test_checked_asin_rejects_large_overshoot() {
        assert_eq!(
            checked_asin('y', 1.01),
            Err(ResliceError::NumericRange {
                component: 'y',
                value: 1.01
            })
        );
    }

    #[test]
    fn test_zero_component_counts_as_positive() {
        assert_eq!(Sign::of(0.0), Sign::Positive);
        assert_eq!(Sign::of(-0.0), Sign::Positive);
        assert_eq!(Sign::of(-1e-300), Sign::Negative);
    }

    #[test]
    fn test_sign_table_rotation_about_y() {
        // x and z disagree: forced positive
        let opposite = SignCase::of(&unit(-1.0, 0.0, 1.0));
        assert_eq!(opposite.xz(), Agreement::Opposite);
        assert_eq!(opposite.rotation_about_y(20.0), 20.0);
        assert_eq!(opposite.rotation_about_y(-20.0), 20.0);

        // x and z agree: forced negative
        let same = SignCase::of(&unit(1.0, 0.0, 1.0));
        assert_eq!(same.xz(), Agreement::Same);
        assert_eq!(same.rotation_about_y(20.0), -20.0);
        assert_eq!(same.rotation_about_y(-20.0), -20.0);
    }

    #[test]
    fn test_sign_table_rotation_about_x() {
        let same = SignCase::of(&unit(0.0, -1.0, -1.0));
        assert_eq!(same.yz(), Agreement::Same);
        assert_eq!(same.rotation_about_x(15.0), 15.0);
        assert_eq!(same.rotation_about_x(-15.0), 15.0);

        let opposite = SignCase::of(&unit(0.0, 1.0, -1.0));
        assert_eq!(opposite.yz(), Agreement::Opposite);
        assert_eq!(opposite.rotation_about_x(15.0), -15.0);
        assert_eq!(opposite.rotation_about_x(-15.0), -15.0);
    }

    #[test]
    fn test_aligned_plane_needs_no_rotation() {
        let r = solve_plane_alignment(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(r.x.abs(), 0.0);
        assert_eq!(r.y.abs(), 0.0);
    }

    #[test]
    fn test_solve_from_points_needs_three() {
        let pts = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        assert_eq!(
            solve_from_points(&pts),
            Err(ResliceError::InsufficientPoints { found: 2 })
        );
        assert_eq!(
            solve_from_points(&[]),
            Err(ResliceError::InsufficientPoints { found: 0 })
        );
    }

    #[test]
    fn test_solve_from_points_ignores_extra_points() {
        let pts = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 1.0),
            p(0.0, 1.0, 1.0),
            p(9.0, 9.0, 9.0),
        ];
        let from_slice = solve_from_points(&pts).unwrap();
        let direct = align_plane(pts[0], pts[1], pts[2]).unwrap();
        assert_eq!(from_slice, direct);
    }
}
