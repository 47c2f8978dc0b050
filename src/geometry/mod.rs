/// Polygon builders: circles, squares, triangles and bottom-closed bands.
pub mod shapes;

/// Affine helpers on nalgebra, plus a trait to apply them to geo_types geometry.
pub mod matrix;

/// Catmull-Rom interpolation for the smoothed wave outlines.
pub mod spline;

/// geo_types -> tiny-skia path conversion (and pixel rounding).
pub mod path;
