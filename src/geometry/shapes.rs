//! Polygon builders for the primitives a backdrop is made of.
//!
//! Everything here is in floating point canvas space (y grows downwards).
//! Nothing is rounded; that happens once, when a shape becomes a raster path.
use geo_types::{coord, Coord, LineString, Polygon};
use num_traits::FromPrimitive;
use std::f64::consts::PI;

/// Just a regular polygon. `rotation` is in radians, 0 puts the first
/// vertex straight up.
pub fn regular_poly(sides: usize, x: f64, y: f64, radius: f64, rotation: f64) -> Polygon<f64> {
    if sides < 3 {
        return Polygon::new(LineString::new(vec![]), vec![]);
    }
    // all the way around to the start again, and hit the first point twice to close it.
    Polygon::new(
        LineString::new(
            (0..=sides)
                .map(|i| {
                    let angle = rotation - PI / 2.0 + (i as f64 / sides as f64) * (2.0 * PI);
                    coord! {x: x + angle.cos() * radius, y: y + angle.sin() * radius}
                })
                .collect(),
        ),
        vec![],
    )
}

/// Draw a regular polygon with enough sides that nobody can tell the difference.
pub fn circle(x0: f64, y0: f64, radius: f64) -> Polygon<f64> {
    let radius = radius.abs();
    let sides = 1000.min(32.max(usize::from_f64(radius).unwrap_or(1000) * 4));
    regular_poly(sides, x0, y0, radius, 0.0)
}

/// Axis aligned rectangle between two corners.
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::new(vec![
            coord! {x: x0, y: y0},
            coord! {x: x1, y: y0},
            coord! {x: x1, y: y1},
            coord! {x: x0, y: y1},
            coord! {x: x0, y: y0},
        ]),
        vec![],
    )
}

pub fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
    rect(x, y, x + size, y + size)
}

/// Isosceles triangle filling the `size` box at `(x, y)`: apex centered on
/// the top edge, base along the bottom edge.
pub fn triangle(x: f64, y: f64, size: f64) -> [Coord<f64>; 3] {
    [
        coord! {x: x + size / 2.0, y: y},
        coord! {x: x, y: y + size},
        coord! {x: x + size, y: y + size},
    ]
}

/// Closes an open curve into a band reaching the bottom of a
/// `width` x `height` canvas: the curve, then `(width, height)`, then `(0, height)`.
pub fn band(curve: &[Coord<f64>], width: f64, height: f64) -> Polygon<f64> {
    let mut outline = Vec::with_capacity(curve.len() + 2);
    outline.extend_from_slice(curve);
    outline.push(coord! {x: width, y: height});
    outline.push(coord! {x: 0.0, y: height});
    // LineString -> Polygon closes the ring for us.
    Polygon::new(LineString::new(outline), vec![])
}
