/// Reslice Web - WASM bindings for a browser-side point picker
///
/// Points cross the boundary as flat `[x0, y0, z0, x1, y1, z1, x2, y2, z2]`
/// arrays.
use reslice_core::{solve_from_points, Interpolation, PlaneAlignment, Point3D, RotationRequest};
use wasm_bindgen::prelude::*;

fn unpack_points(coords: &[f64]) -> Result<Vec<Point3D>, String> {
    if coords.len() % 3 != 0 {
        return Err(format!(
            "expected x,y,z triples, got {} numbers",
            coords.len()
        ));
    }
    Ok(coords
        .chunks_exact(3)
        .map(|c| Point3D::new(c[0], c[1], c[2]))
        .collect())
}

fn align(coords: &[f64]) -> Result<PlaneAlignment, String> {
    let points = unpack_points(coords)?;
    solve_from_points(&points).map_err(|e| e.to_string())
}

fn interpolation_from_name(name: &str) -> Result<Interpolation, String> {
    Interpolation::from_label(name).ok_or_else(|| format!("unknown interpolation {:?}", name))
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Returns `[rot_x, rot_y, nx, ny, nz]`, angles in degrees
#[wasm_bindgen]
pub fn solve_plane_alignment(coords: &[f64]) -> Result<Vec<f64>, JsValue> {
    let alignment = align(coords).map_err(to_js_error)?;
    let [nx, ny, nz] = alignment.normal.to_array();
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "Rotating by {:.2} deg about y and {:.2} deg about x",
        alignment.rotation.y, alignment.rotation.x
    )));
    Ok(vec![alignment.rotation.x, alignment.rotation.y, nx, ny, nz])
}

/// Option string for "TransformJ Rotate", e.g. interpolation "Quintic B-Spline"
#[wasm_bindgen]
pub fn transformj_options(
    coords: &[f64],
    interpolation: &str,
    background: f64,
) -> Result<String, JsValue> {
    let alignment = align(coords).map_err(to_js_error)?;
    let interpolation = interpolation_from_name(interpolation).map_err(to_js_error)?;
    Ok(RotationRequest::new(alignment.rotation)
        .with_interpolation(interpolation)
        .with_background(background)
        .transformj_options())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_rejects_partial_triples() {
        assert!(unpack_points(&[1.0, 2.0, 3.0, 4.0]).is_err());
        assert_eq!(unpack_points(&[1.0, 2.0, 3.0]).unwrap().len(), 1);
    }

    #[test]
    fn test_align_reports_solver_errors() {
        let err = align(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap_err();
        assert!(err.contains("found 2"));

        let err = align(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0]).unwrap_err();
        assert!(err.contains("collinear"));
    }

    #[test]
    fn test_align_tilted_plane() {
        let a = align(&[0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
        approx::assert_relative_eq!(a.rotation.y, 35.264389682754654, epsilon = 1e-9);
        approx::assert_relative_eq!(a.rotation.x, -35.264389682754654, epsilon = 1e-9);
    }

    #[test]
    fn test_interpolation_names() {
        assert_eq!(
            interpolation_from_name("cubic o-moms").unwrap(),
            Interpolation::CubicOMoms
        );
        assert!(interpolation_from_name("sinc").is_err());
    }
}
