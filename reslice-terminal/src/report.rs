/// Printable summary of one plane alignment
use reslice_core::{PlaneAlignment, RotationAngles, RotationRequest};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub normal: [f64; 3],
    pub xz_angle: f64,
    pub yz_angle: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub transformj_options: String,
}

impl SolveReport {
    pub fn new(alignment: &PlaneAlignment, request: &RotationRequest) -> Self {
        Self {
            normal: alignment.normal.to_array(),
            xz_angle: alignment.axis_angles.xz,
            yz_angle: alignment.axis_angles.yz,
            rotate_x: request.angles.x,
            rotate_y: request.angles.y,
            rotate_z: RotationAngles::Z,
            transformj_options: request.transformj_options(),
        }
    }

    pub fn to_text(&self) -> String {
        let [nx, ny, nz] = self.normal;
        format!(
            "plane normal   ({:.6}, {:.6}, {:.6})\n\
             xz-angle       {:.4} deg\n\
             yz-angle       {:.4} deg\n\
             rotate about x {:.4} deg\n\
             rotate about y {:.4} deg\n\
             TransformJ     {}",
            nx,
            ny,
            nz,
            self.xz_angle,
            self.yz_angle,
            self.rotate_x,
            self.rotate_y,
            self.transformj_options
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reslice_core::{align_plane, Point3D};

    fn report() -> SolveReport {
        let alignment = align_plane(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 1.0),
            Point3D::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        SolveReport::new(&alignment, &RotationRequest::new(alignment.rotation))
    }

    #[test]
    fn test_text_lists_every_angle() {
        let text = report().to_text();
        assert!(text.contains("rotate about x -35.2644 deg"));
        assert!(text.contains("rotate about y 35.2644 deg"));
        assert!(text.contains("interpolation=[Quintic B-Spline]"));
    }

    #[test]
    fn test_json_fields() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["rotate_z"], 0.0);
        assert_eq!(value["normal"].as_array().unwrap().len(), 3);
        assert!(value["transformj_options"]
            .as_str()
            .unwrap()
            .starts_with("z-angle=0.0 y-angle=35.26"));
    }
}
