//! Translucent circles, squares and triangles scattered over near-white.
use geo_types::{coord, Coord, Geometry, LineString, Polygon};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_dimensions, CountRange};
use crate::canvas::Canvas;
use crate::errors::{ComposeError, ComposeResult};
use crate::geometry::matrix::{rotate_about, TransformGeometry};
use crate::geometry::shapes;
use crate::palette::{near_white, Palette, Rgb, Rgba};
use crate::random::RandomSource;

/// Alpha range for shape fills, so overlaps stay visible.
pub const ALPHA_RANGE: (i64, i64) = (100, 180);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];
}

/// One randomized primitive. `origin` and `size` describe the square
/// bounding box the shape is built in; `rotation` (degrees) only turns
/// triangles.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub origin: Coord<f64>,
    pub size: f64,
    pub fill: Rgba,
    pub rotation: f64,
}

impl Shape {
    pub fn center(&self) -> Coord<f64> {
        coord! {x: self.origin.x + self.size / 2.0, y: self.origin.y + self.size / 2.0}
    }

    /// Triangle corners after rotation about the bounding box center.
    pub fn triangle_vertices(&self) -> [Coord<f64>; 3] {
        let corners = shapes::triangle(self.origin.x, self.origin.y, self.size);
        let rotated = corners.to_vec().transformed(&rotate_about(self.center(), self.rotation));
        [rotated[0], rotated[1], rotated[2]]
    }

    pub fn outline(&self) -> Geometry<f64> {
        match self.kind {
            ShapeKind::Circle => {
                let center = self.center();
                Geometry::Polygon(shapes::circle(center.x, center.y, self.size / 2.0))
            }
            ShapeKind::Square => {
                Geometry::Polygon(shapes::square(self.origin.x, self.origin.y, self.size))
            }
            ShapeKind::Triangle => Geometry::Polygon(Polygon::new(
                LineString::new(self.triangle_vertices().to_vec()),
                vec![],
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct GeometricOptions {
    /// How many shapes to draw.
    pub shapes: CountRange,
    /// Multiplier on the sampled shape size. The tall status-card layout
    /// uses 3.0 for a few huge, mostly off-canvas shapes.
    pub size_scale: f64,
}

impl Default for GeometricOptions {
    fn default() -> Self {
        Self {
            shapes: CountRange::DEFAULT_SHAPES,
            size_scale: 1.0,
        }
    }
}

/// The random draws for one geometric backdrop, before anything is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometricPlan {
    pub background: Rgb,
    pub shapes: Vec<Shape>,
}

impl GeometricPlan {
    /// Draws the shapes in generation order, each blended over the last.
    pub fn draw(&self, canvas: &mut Canvas) {
        for shape in &self.shapes {
            canvas.fill(&shape.outline(), shape.fill);
        }
    }
}

fn sample_shape<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    size_scale: f64,
    palette: &Palette,
    rng: &mut R,
) -> Shape {
    let kind = rng
        .choose(&ShapeKind::ALL)
        .copied()
        .unwrap_or(ShapeKind::Circle);
    let fill = palette
        .pick(rng)
        .with_alpha(rng.uniform_int(ALPHA_RANGE.0, ALPHA_RANGE.1) as u8);

    let w = i64::from(width);
    let size = rng.uniform_int(w / 3, (f64::from(width) / 1.5) as i64) as f64 * size_scale;

    // Up to a quarter of the shape may hang off the top/left edge, and it
    // must start no later than half its size before the far edge.
    let low = (-size / 4.0).floor() as i64;
    let half = size as i64 / 2;
    let x_high = (w - half).max(low);
    let y_high = (i64::from(height) - half).max(low);
    let x = rng.uniform_int(low, x_high) as f64;
    let y = rng.uniform_int(low, y_high) as f64;

    let rotation = match kind {
        ShapeKind::Triangle => rng.uniform_float(0.0, 360.0),
        _ => 0.0,
    };

    Shape {
        kind,
        origin: coord! {x: x, y: y},
        size,
        fill,
        rotation,
    }
}

/// Samples the background and every shape of a geometric backdrop.
pub fn plan_geometric<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    options: &GeometricOptions,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<GeometricPlan> {
    check_dimensions(width, height)?;
    let count = options.shapes.validate()?;
    if !options.size_scale.is_finite() || options.size_scale <= 0.0 {
        return Err(ComposeError::InvalidScale(options.size_scale));
    }
    palette.ensure_not_empty()?;

    let background = near_white(rng);
    let n = count.sample(rng);
    let shapes: Vec<Shape> = (0..n)
        .map(|_| sample_shape(width, height, options.size_scale, palette, rng))
        .collect();
    debug!(width, height, shapes = shapes.len(), "planned geometric backdrop");
    Ok(GeometricPlan { background, shapes })
}

/// A near-white canvas with `options.shapes` translucent shapes on it.
pub fn compose_geometric<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    options: &GeometricOptions,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<Canvas> {
    let plan = plan_geometric(width, height, options, palette, rng)?;
    let mut canvas = Canvas::new(width, height, plan.background)?;
    plan.draw(&mut canvas);
    Ok(canvas)
}
