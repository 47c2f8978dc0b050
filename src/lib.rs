//! Procedural decorative backdrops for poster and status-image generators.
//!
//! A backdrop is a plain RGB raster: translucent circles, squares and
//! triangles scattered over a near-white field, stacked sine bands (plain
//! or spline smoothed), a two-color vertical gradient, or a little pastel
//! landscape. Text and other foreground content get drawn on top by
//! whoever asked for the backdrop.
//!
//! Geometry is built with geo_types and nalgebra, then rasterized with
//! tiny-skia. All randomness goes through [`random::RandomSource`], so a
//! seeded generator always produces the same image.
//!
//! ```no_run
//! use backdrop::prelude::*;
//!
//! let mut rng = backdrop::random::seeded(12345);
//! let canvas = compose_geometric(
//!     1000,
//!     1000,
//!     &GeometricOptions::default(),
//!     &Palette::pastel(),
//!     &mut rng,
//! )?;
//! backdrop::sink::save(&canvas.flatten(), "out.jpg".as_ref(), 95)?;
//! # Ok::<(), backdrop::errors::ComposeError>(())
//! ```

/// RGBA raster surface the composers paint on.
pub mod canvas;

/// The geometric, wave, gradient and landscape composers.
pub mod composer;

/// RON configuration for a backdrop.
pub mod config;

pub mod errors;

/// Shapes, affine transforms and splines on geo_types, and the bridge to
/// raster paths.
pub mod geometry;

/// Colors and the built-in palettes.
pub mod palette;

/// The random source every composer draws from.
pub mod random;

/// Saving images.
pub mod sink;

/// Everything needed to compose and save a backdrop in one import.
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::composer::{
        compose, compose_geometric, compose_gradient, compose_landscape, compose_many,
        compose_waves, CountRange, GeometricOptions, Mode, ShapeKind, WaveVariant,
    };
    pub use crate::config::{ComposerConfig, PaletteSpec};
    pub use crate::errors::{ComposeError, ComposeResult};
    pub use crate::palette::{Palette, Rgb, Rgba};
    pub use crate::random::RandomSource;
}
