use geo::MapCoords;
use geo_types::{coord, Coord, Geometry, LineString, Polygon};
use nalgebra::{Affine2, Matrix3, Point2 as NPoint2};

/// Helper to create a scaling matrix
pub fn scale_matrix(sx: f64, sy: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
}

/// Helper to create a translation matrix
pub fn translate_matrix(tx: f64, ty: f64) -> Affine2<f64> {
    Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0))
}

/// Standard mathematical rotation, radians. In raster space (y down) a
/// positive angle turns clockwise on screen.
pub fn rotate_matrix(radians: f64) -> Affine2<f64> {
    let (sin, cos) = radians.sin_cos();
    Affine2::from_matrix_unchecked(Matrix3::new(
        cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0,
    ))
}

/// Rotation by `degrees` about `center`:
/// `(cx + dx·cos θ − dy·sin θ, cy + dx·sin θ + dy·cos θ)`.
pub fn rotate_about(center: Coord<f64>, degrees: f64) -> Affine2<f64> {
    translate_matrix(center.x, center.y)
        * rotate_matrix(degrees.to_radians())
        * translate_matrix(-center.x, -center.y)
}

pub fn xform_coord(xy: Coord<f64>, affine: &Affine2<f64>) -> Coord<f64> {
    let out = affine * NPoint2::new(xy.x, xy.y);
    coord!(x: out.x, y: out.y)
}

pub trait TransformGeometry {
    fn transformed(&self, affine: &Affine2<f64>) -> Self;
}

impl TransformGeometry for Geometry<f64> {
    fn transformed(&self, affine: &Affine2<f64>) -> Geometry<f64> {
        self.map_coords(|xy| xform_coord(xy, affine))
    }
}

impl TransformGeometry for Polygon<f64> {
    fn transformed(&self, affine: &Affine2<f64>) -> Polygon<f64> {
        self.map_coords(|xy| xform_coord(xy, affine))
    }
}

impl TransformGeometry for LineString<f64> {
    fn transformed(&self, affine: &Affine2<f64>) -> LineString<f64> {
        self.map_coords(|xy| xform_coord(xy, affine))
    }
}

impl TransformGeometry for Vec<Coord<f64>> {
    fn transformed(&self, affine: &Affine2<f64>) -> Vec<Coord<f64>> {
        self.iter().map(|xy| xform_coord(*xy, affine)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn test_translate() {
        let out = xform_coord(coord! {x: 25., y: 25.}, &translate_matrix(10., 5.));
        assert!(distance(out, coord! {x: 35., y: 30.}) < 1e-8);
    }

    #[test]
    fn test_scale() {
        let out = xform_coord(coord! {x: 3., y: -2.}, &scale_matrix(2., 0.5));
        assert!(distance(out, coord! {x: 6., y: -1.}) < 1e-8);
    }

    #[test]
    fn test_simple_rotate() {
        for (radians, source, destination) in [
            (PI / 2., coord! {x: 1., y: 0.}, coord! {x: 0., y: 1.}),
            (PI, coord! {x: 1., y: 0.}, coord! {x: -1., y: 0.}),
            (PI / 2., coord! {x: 0., y: 1.}, coord! {x: -1., y: 0.}),
            (
                -PI / 4.,
                coord! {x: 1., y: 0.},
                coord! {x: 0.7071067811865476, y: -0.7071067811865476},
            ),
        ] {
            let out = xform_coord(source, &rotate_matrix(radians));
            assert!(distance(out, destination) < 1e-8);
        }
    }

    #[test]
    fn test_rotate_about_matches_closed_form() {
        let center = coord! {x: 50., y: 40.};
        let point = coord! {x: 80., y: 10.};
        for degrees in [0.0, 17.5, 90.0, 181.0, 359.9] {
            let theta = f64::to_radians(degrees);
            let (dx, dy) = (point.x - center.x, point.y - center.y);
            let expected = coord! {
                x: center.x + dx * theta.cos() - dy * theta.sin(),
                y: center.y + dx * theta.sin() + dy * theta.cos(),
            };
            let out = xform_coord(point, &rotate_about(center, degrees));
            assert!(distance(out, expected) < 1e-9);
        }
    }

    #[test]
    fn test_center_is_fixed() {
        let center = coord! {x: -12., y: 300.};
        let out = xform_coord(center, &rotate_about(center, 123.0));
        assert!(distance(out, center) < 1e-9);
    }
}
