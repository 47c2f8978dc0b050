//! Backdrop configuration, loadable from RON.
//!
//! ```ron
//! (
//!     width: 1080,
//!     height: 1920,
//!     mode: Geometric,
//!     count: Some((min: 3, max: 5)),
//!     palette: Some(Named("pastel")),
//!     size_scale: 3.0,
//! )
//! ```
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::composer::{CountRange, Mode};
use crate::errors::{ComposeError, ComposeResult};
use crate::palette::Palette;

/// Where the fill colors come from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum PaletteSpec {
    /// One of the built-ins, see [`crate::palette::PALETTE_NAMES`].
    Named(String),
    /// CSS color strings.
    Colors(Vec<String>),
}

impl PaletteSpec {
    pub fn resolve(&self) -> ComposeResult<Palette> {
        match self {
            PaletteSpec::Named(name) => Palette::named(name),
            PaletteSpec::Colors(colors) => Palette::from_css(colors),
        }
    }
}

fn default_size_scale() -> f64 {
    1.0
}

fn default_anti_alias() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ComposerConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub mode: Mode,
    /// Shapes, bands or hills. `None` uses the mode's default.
    #[serde(default)]
    pub count: Option<CountRange>,
    /// `None` uses the mode's default palette.
    #[serde(default)]
    pub palette: Option<PaletteSpec>,
    /// Geometric mode only: multiplier on shape size.
    #[serde(default = "default_size_scale")]
    pub size_scale: f64,
    #[serde(default = "default_anti_alias")]
    pub anti_alias: bool,
}

impl ComposerConfig {
    /// Geometric mode with every other knob at its default.
    pub fn new(width: u32, height: u32) -> ComposerConfig {
        ComposerConfig {
            width,
            height,
            mode: Mode::default(),
            count: None,
            palette: None,
            size_scale: default_size_scale(),
            anti_alias: default_anti_alias(),
        }
    }

    pub fn count(&self) -> CountRange {
        self.count.unwrap_or_else(|| self.mode.default_count())
    }

    pub fn palette(&self) -> ComposeResult<Palette> {
        match &self.palette {
            Some(spec) => spec.resolve(),
            None => Palette::named(self.mode.default_palette()),
        }
    }

    pub fn from_ron_str(source: &str) -> ComposeResult<ComposerConfig> {
        ron::from_str(source).map_err(|err| ComposeError::config(err.to_string()))
    }

    pub fn to_ron_string(&self) -> ComposeResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|err| ComposeError::config(err.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ComposeResult<ComposerConfig> {
        let source = std::fs::read_to_string(path)?;
        ComposerConfig::from_ron_str(&source)
    }
}
