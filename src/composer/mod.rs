//! The backdrop composers.
//!
//! Every composer is split in two: a `plan_*` function that makes all the
//! random draws up front, and a `compose_*` function that turns the plan
//! into a [`Canvas`]. Plans are plain data, which is what the tests poke
//! at. [`compose`] picks the right pair from a [`ComposerConfig`].
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::Canvas;
use crate::config::ComposerConfig;
use crate::errors::{ComposeError, ComposeResult};
use crate::palette::Rgb;
use crate::random::{self, RandomSource};

pub mod geometric;
pub mod gradient;
pub mod landscape;
pub mod waves;

pub use geometric::{compose_geometric, plan_geometric, GeometricOptions, Shape, ShapeKind};
pub use gradient::compose_gradient;
pub use landscape::compose_landscape;
pub use waves::{compose_waves, plan_waves, WaveBand, WaveVariant};

/// Inclusive `[min, max]` range of shapes, bands or hills. `0` is allowed
/// and means "background only".
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const DEFAULT_SHAPES: CountRange = CountRange { min: 3, max: 5 };

    pub fn new(min: u32, max: u32) -> ComposeResult<CountRange> {
        CountRange { min, max }.validate()
    }

    pub const fn exact(n: u32) -> CountRange {
        CountRange { min: n, max: n }
    }

    /// The range itself if `min <= max`.
    pub fn validate(self) -> ComposeResult<CountRange> {
        if self.min > self.max {
            return Err(ComposeError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(self)
    }

    pub fn sample<R: RandomSource + ?Sized>(self, rng: &mut R) -> u32 {
        rng.uniform_int(i64::from(self.min), i64::from(self.max)) as u32
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> ComposeResult<()> {
    if width == 0 || height == 0 {
        return Err(ComposeError::InvalidDimension { width, height });
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Geometric,
    WaveSimple,
    WaveSmoothed,
    Gradient,
    Landscape,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Geometric,
        Mode::WaveSimple,
        Mode::WaveSmoothed,
        Mode::Gradient,
        Mode::Landscape,
    ];

    /// Shape/band/hill count used when the config doesn't give one.
    /// Gradients don't count anything.
    pub fn default_count(self) -> CountRange {
        match self {
            Mode::Geometric => CountRange::DEFAULT_SHAPES,
            Mode::WaveSimple => WaveVariant::Simple.default_layers(),
            Mode::WaveSmoothed => WaveVariant::Smoothed.default_layers(),
            Mode::Gradient => CountRange::exact(0),
            Mode::Landscape => CountRange::exact(6),
        }
    }

    /// Whether the count range means anything for this mode. Gradients
    /// always use exactly two colors and ignore it.
    pub fn uses_count(self) -> bool {
        !matches!(self, Mode::Gradient)
    }

    pub fn default_palette(self) -> &'static str {
        match self {
            Mode::Geometric | Mode::WaveSimple | Mode::WaveSmoothed => "pastel",
            Mode::Gradient => "muted",
            Mode::Landscape => "dusk",
        }
    }

    /// File name prefix for saved output.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Mode::Geometric => "geometric_art",
            Mode::WaveSimple | Mode::WaveSmoothed => "wavy_art",
            Mode::Gradient => "gradient_art",
            Mode::Landscape => "pastel_landscape",
        }
    }
}

/// Composes one backdrop as described by `config`.
pub fn compose<R: RandomSource + ?Sized>(
    config: &ComposerConfig,
    rng: &mut R,
) -> ComposeResult<Canvas> {
    let (width, height) = (config.width, config.height);
    let count = config.count();
    let palette = config.palette()?;
    debug!(mode = ?config.mode, width, height, ?count, "composing backdrop");

    let canvas = match config.mode {
        Mode::Geometric => {
            let options = GeometricOptions {
                shapes: count,
                size_scale: config.size_scale,
            };
            let plan = plan_geometric(width, height, &options, &palette, rng)?;
            let mut canvas = Canvas::new(width, height, plan.background)?;
            canvas.anti_alias(config.anti_alias);
            plan.draw(&mut canvas);
            canvas
        }
        Mode::WaveSimple | Mode::WaveSmoothed => {
            let variant = match config.mode {
                Mode::WaveSimple => WaveVariant::Simple,
                _ => WaveVariant::Smoothed,
            };
            let plan = plan_waves(width, height, count, variant, &palette, rng)?;
            let mut canvas = Canvas::new(width, height, plan.background)?;
            canvas.anti_alias(config.anti_alias);
            plan.draw(&mut canvas);
            canvas
        }
        Mode::Gradient => compose_gradient(width, height, &palette, rng)?,
        Mode::Landscape => {
            let plan = landscape::plan_landscape(width, height, count, &palette, rng)?;
            let mut canvas = Canvas::new(width, height, Rgb::WHITE)?;
            canvas.anti_alias(config.anti_alias);
            plan.draw(&mut canvas);
            canvas
        }
    };
    Ok(canvas)
}

/// One backdrop per seed, composed in parallel. Each seed gets its own
/// generator, so output `i` depends only on `seeds[i]`.
pub fn compose_many(config: &ComposerConfig, seeds: &[u64]) -> Vec<ComposeResult<Canvas>> {
    seeds
        .par_iter()
        .map(|&seed| compose(config, &mut random::seeded(seed)))
        .collect()
}
