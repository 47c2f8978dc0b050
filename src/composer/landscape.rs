//! A flat pastel landscape: striped sky, a sun, rolling hills and a path.
//!
//! Everything is laid out in unit space (`u` right, `v` up, both in
//! `[0, 1]`) and mapped onto the canvas with one affine transform.
use geo_types::{coord, Coord, Geometry, LineString, Polygon};
use nalgebra::Affine2;
use tracing::debug;

use super::{check_dimensions, CountRange};
use crate::canvas::Canvas;
use crate::errors::ComposeResult;
use crate::geometry::matrix::{scale_matrix, translate_matrix, TransformGeometry};
use crate::geometry::shapes;
use crate::palette::{Palette, Rgb};
use crate::random::RandomSource;

const SKY_STRIPS: usize = 100;
const SKY_STRIP_HEIGHT: f64 = 0.01;
const SUN_CENTER: (f64, f64) = (0.75, 0.72);
const SUN_RADIUS: f64 = 0.12;
const HILL_SAMPLES: usize = 500;
const HILL_BASE: f64 = 0.3;
const HILL_STEP: f64 = 0.05;
const HILL_VARIATION: f64 = 0.1;
const PATH_WIDTH: f64 = 0.011;

#[derive(Clone, Debug, PartialEq)]
pub struct LandscapePlan {
    pub sky_top: Rgb,
    pub sky_bottom: Rgb,
    pub sun: Rgb,
    pub hills: Vec<Rgb>,
    pub path: Rgb,
}

/// `(u, v)` unit space to pixels, flipping `v` so up is up.
fn unit_to_canvas(width: u32, height: u32) -> Affine2<f64> {
    translate_matrix(0.0, f64::from(height)) * scale_matrix(f64::from(width), -f64::from(height))
}

fn linspace(n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(move |i| i as f64 / (n - 1) as f64)
}

/// Hill `layer` as a filled polygon in unit space.
pub fn hill(layer: usize) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = linspace(HILL_SAMPLES)
        .map(|u| {
            let v = (u * 5.0 + layer as f64).sin() * HILL_VARIATION
                + HILL_BASE
                + HILL_STEP * layer as f64;
            coord! {x: u, y: v.clamp(0.0, 1.0)}
        })
        .collect();
    // down to the ground on the right, back along it to the left
    ring.push(coord! {x: 1.0, y: 0.0});
    ring.push(coord! {x: 0.0, y: 0.0});
    Polygon::new(LineString::new(ring), vec![])
}

/// The winding path, as an open line in unit space.
pub fn path_line() -> LineString<f64> {
    linspace(HILL_SAMPLES)
        .map(|u| coord! {x: u, y: 0.15 + 0.05 * (u * 6.0).sin()})
        .collect()
}

impl LandscapePlan {
    pub fn draw(&self, canvas: &mut Canvas) {
        let (width, height) = (canvas.width(), canvas.height());
        let to_canvas = unit_to_canvas(width, height);

        // Sky strips fade from the bottom color up to the top color over
        // the upper half.
        for i in 0..SKY_STRIPS {
            let r = i as f64 / SKY_STRIPS as f64;
            let v0 = 1.0 - r * 0.5;
            let strip = shapes::rect(0.0, v0, 1.0, v0 + SKY_STRIP_HEIGHT).transformed(&to_canvas);
            let color = self.sky_bottom.lerp(self.sky_top, r);
            canvas.fill(&Geometry::Polygon(strip), color.opaque());
        }

        let radius = SUN_RADIUS * f64::from(width.min(height));
        let sun = Geometry::Polygon(shapes::circle(
            SUN_CENTER.0 * f64::from(width),
            (1.0 - SUN_CENTER.1) * f64::from(height),
            radius,
        ));
        canvas.fill(&sun, self.sun.opaque());

        for (layer, color) in self.hills.iter().enumerate() {
            let ground = hill(layer).transformed(&to_canvas);
            canvas.fill(&Geometry::Polygon(ground), color.opaque());
        }

        canvas.stroke(
            &path_line().transformed(&to_canvas),
            self.path.opaque(),
            PATH_WIDTH * f64::from(width),
        );
    }
}

pub fn plan_landscape<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    hills: CountRange,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<LandscapePlan> {
    check_dimensions(width, height)?;
    let hills = hills.validate()?;
    palette.ensure_not_empty()?;

    let sky_top = palette.pick(rng);
    let sky_bottom = palette.pick(rng);
    let sun = palette.pick(rng);
    let n = hills.sample(rng);
    let hills = (0..n).map(|_| palette.pick(rng)).collect::<Vec<_>>();
    let path = palette.pick(rng);
    debug!(width, height, hills = hills.len(), "planned landscape backdrop");
    Ok(LandscapePlan {
        sky_top,
        sky_bottom,
        sun,
        hills,
        path,
    })
}

/// White canvas, then sky, sun, hills and path, back to front.
pub fn compose_landscape<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    hills: CountRange,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<Canvas> {
    let plan = plan_landscape(width, height, hills, palette, rng)?;
    let mut canvas = Canvas::new(width, height, Rgb::WHITE)?;
    plan.draw(&mut canvas);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;
    use geo::BoundingRect;

    #[test]
    fn unit_space_maps_onto_the_canvas() {
        let rect = shapes::rect(0.0, 0.0, 1.0, 1.0).transformed(&unit_to_canvas(640, 360));
        let bounds = rect.bounding_rect().unwrap();
        assert!((bounds.min().x - 0.0).abs() < 1e-9);
        assert!((bounds.max().x - 640.0).abs() < 1e-9);
        assert!((bounds.min().y - 0.0).abs() < 1e-9);
        assert!((bounds.max().y - 360.0).abs() < 1e-9);
    }

    #[test]
    fn hills_rise_with_each_layer() {
        let ridge = |layer: usize| hill(layer).exterior().0[0].y;
        // at u = 0 the ridge is sin(layer)·0.1 + 0.3 + 0.05·layer
        for layer in 0..6 {
            let expected = (layer as f64).sin() * 0.1 + 0.3 + 0.05 * layer as f64;
            assert!((ridge(layer) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn hills_are_clamped_to_unit_space() {
        let poly = hill(40);
        assert!(poly.exterior().0.iter().all(|c| (0.0..=1.0).contains(&c.y)));
    }

    #[test]
    fn landscape_layers_in_order() {
        let palette = Palette::dusk();
        let plan = plan_landscape(400, 300, CountRange::exact(6), &palette, &mut seeded(10)).unwrap();
        assert_eq!(plan.hills.len(), 6);

        let canvas =
            compose_landscape(400, 300, CountRange::exact(6), &palette, &mut seeded(10)).unwrap();
        assert!(canvas.is_opaque());
        // bottom-left corner is under the front-most hill
        assert_eq!(
            canvas.pixel(0, 299),
            Some(plan.hills.last().copied().unwrap().opaque())
        );
        // the first strip sits above the canvas; the third (r = 0.02) is
        // the last one to cover the top row
        assert_eq!(
            canvas.pixel(5, 0),
            Some(plan.sky_bottom.lerp(plan.sky_top, 0.02).opaque())
        );
    }
}
