/// Geometry primitives for plane alignment
use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// A point picked in a 3D stack: (x, y) in pixels, z as the slice position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Shift every coordinate by the same offset
    pub fn translated(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl From<Point3<f64>> for Point3D {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<[f64; 3]> for Point3D {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// A direction of Euclidean length 1.
///
/// Only produced by normalizing a vector with a non-negligible norm, so the
/// components always lie in [-1, 1] up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVector3D(Unit<Vector3<f64>>);

impl UnitVector3D {
    /// Normalize `v`, rejecting zero-length and non-finite vectors
    pub fn try_new(v: Vector3<f64>) -> Option<Self> {
        let norm = v.norm();
        if !norm.is_finite() || norm == 0.0 {
            return None;
        }
        Some(Self(Unit::new_unchecked(v / norm)))
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(v: Vector3<f64>) -> Self {
        Self(Unit::new_unchecked(v))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Length recomputed from the components; 1 up to rounding
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }
}

impl std::ops::Neg for UnitVector3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Rotation angles in degrees handed to the resampler.
/// The rotation about z is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationAngles {
    pub x: f64,
    pub y: f64,
}

impl RotationAngles {
    pub const Z: f64 = 0.0;

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotation matrix applying x first, then y (Ry * Rx)
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(
            self.x.to_radians(),
            self.y.to_radians(),
            Self::Z.to_radians(),
        )
    }
}
