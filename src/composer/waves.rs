//! Horizontal sine bands, stacked and filled down to the bottom edge.
//!
//! Two flavours: `Simple` samples the sine directly every 5px, `Smoothed`
//! jitters a coarse set of control points and runs them through a
//! Catmull-Rom spline for a hand-drawn look. Bands are opaque; later ones
//! cover earlier ones.
use geo_types::{coord, Coord, Geometry};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::debug;

use super::{check_dimensions, CountRange};
use crate::canvas::Canvas;
use crate::errors::ComposeResult;
use crate::geometry::shapes;
use crate::geometry::spline::{catmull_rom_chain, SEGMENT_POINTS};
use crate::palette::{near_white, Palette, Rgb};
use crate::random::RandomSource;

const SIMPLE_STEP: usize = 5;
const SIMPLE_SPACING: i64 = 60;
const SIMPLE_JITTER: i64 = 30;
const CONTROL_NOISE: f64 = 10.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveVariant {
    Simple,
    Smoothed,
}

impl WaveVariant {
    pub fn default_layers(self) -> CountRange {
        match self {
            WaveVariant::Simple => CountRange::exact(5),
            WaveVariant::Smoothed => CountRange::exact(6),
        }
    }
}

/// One band: the sampled sine parameters and the curve they produced.
/// `curve` is the open top edge; [`WaveBand::outline`] closes it.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveBand {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub y_offset: f64,
    pub fill: Rgb,
    pub curve: Vec<Coord<f64>>,
}

impl WaveBand {
    /// The curve followed by `(width, height)` and `(0, height)`.
    pub fn outline(&self, width: u32, height: u32) -> Geometry<f64> {
        Geometry::Polygon(shapes::band(
            &self.curve,
            f64::from(width),
            f64::from(height),
        ))
    }

    fn sine(&self, x: f64) -> f64 {
        self.y_offset + self.amplitude * (self.frequency * x + self.phase).sin()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WavePlan {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub bands: Vec<WaveBand>,
}

impl WavePlan {
    pub fn draw(&self, canvas: &mut Canvas) {
        for band in &self.bands {
            canvas.fill(&band.outline(self.width, self.height), band.fill.opaque());
        }
    }
}

fn simple_band<R: RandomSource + ?Sized>(
    index: u32,
    layers: u32,
    width: u32,
    height: u32,
    palette: &Palette,
    rng: &mut R,
) -> WaveBand {
    let amplitude = rng.uniform_float(20.0, 80.0);
    let frequency = rng.uniform_float(0.005, 0.02);
    let phase = rng.uniform_float(0.0, TAU);
    let row = i64::from(index) - i64::from(layers / 2);
    let y_offset = i64::from(height / 2)
        + row * SIMPLE_SPACING
        + rng.uniform_int(-SIMPLE_JITTER, SIMPLE_JITTER);
    let fill = palette.pick(rng);

    let mut band = WaveBand {
        amplitude,
        frequency,
        phase,
        y_offset: y_offset as f64,
        fill,
        curve: vec![],
    };
    // Runs a little past the right edge so the band never stops short.
    band.curve = (0..width as usize + 10)
        .step_by(SIMPLE_STEP)
        .map(|x| {
            let x = x as f64;
            coord! {x: x, y: band.sine(x)}
        })
        .collect();
    band
}

/// Jittered control points, one stride before the left edge through two
/// strides past the right edge, so every visible segment has neighbours.
fn control_points<R: RandomSource + ?Sized>(
    band: &WaveBand,
    width: u32,
    rng: &mut R,
) -> Vec<Coord<f64>> {
    let step = i64::from((width / 10).max(1));
    let end = i64::from(width) + 2 * step;
    let mut points = Vec::new();
    let mut x = -step;
    while x < end {
        let xf = x as f64;
        let y = band.sine(xf) + rng.uniform_float(-CONTROL_NOISE, CONTROL_NOISE);
        points.push(coord! {x: xf, y: y});
        x += step;
    }
    points
}

/// Baseline range for smoothed bands: a quarter height past either edge,
/// with the low end floored.
fn smoothed_offset_range(height: u32) -> (i64, i64) {
    let h = i64::from(height);
    ((-h).div_euclid(4), h + h / 4)
}

fn smoothed_band<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    palette: &Palette,
    rng: &mut R,
) -> WaveBand {
    let h = f64::from(height);
    let amplitude = rng.uniform_float(h * 0.1, h * 0.25);
    let frequency = rng.uniform_float(0.002, 0.008);
    let phase = rng.uniform_float(0.0, TAU);
    let (lo, hi) = smoothed_offset_range(height);
    let y_offset = rng.uniform_int(lo, hi);
    let fill = palette.pick(rng);

    let mut band = WaveBand {
        amplitude,
        frequency,
        phase,
        y_offset: y_offset as f64,
        fill,
        curve: vec![],
    };
    let controls = control_points(&band, width, rng);
    band.curve = catmull_rom_chain(&controls, SEGMENT_POINTS);
    band
}

pub fn plan_waves<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    layers: CountRange,
    variant: WaveVariant,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<WavePlan> {
    check_dimensions(width, height)?;
    let layers = layers.validate()?;
    palette.ensure_not_empty()?;

    let background = near_white(rng);
    let n = layers.sample(rng);
    let bands: Vec<WaveBand> = (0..n)
        .map(|i| match variant {
            WaveVariant::Simple => simple_band(i, n, width, height, palette, rng),
            WaveVariant::Smoothed => smoothed_band(width, height, palette, rng),
        })
        .collect();
    debug!(width, height, ?variant, bands = bands.len(), "planned wave backdrop");
    Ok(WavePlan {
        width,
        height,
        background,
        bands,
    })
}

/// A near-white canvas covered by `layers` opaque wave bands. Zero layers
/// is allowed and leaves just the background.
pub fn compose_waves<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    layers: CountRange,
    variant: WaveVariant,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<Canvas> {
    let plan = plan_waves(width, height, layers, variant, palette, rng)?;
    let mut canvas = Canvas::new(width, height, plan.background)?;
    plan.draw(&mut canvas);
    Ok(canvas)
}
