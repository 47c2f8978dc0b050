use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use backdrop::composer::{compose_many, CountRange, Mode};
use backdrop::config::{ComposerConfig, PaletteSpec};
use backdrop::random;
use backdrop::sink;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Geometric,
    Waves,
    SmoothWaves,
    Gradient,
    Landscape,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Mode {
        match arg {
            ModeArg::Geometric => Mode::Geometric,
            ModeArg::Waves => Mode::WaveSimple,
            ModeArg::SmoothWaves => Mode::WaveSmoothed,
            ModeArg::Gradient => Mode::Gradient,
            ModeArg::Landscape => Mode::Landscape,
        }
    }
}

/// Compose decorative backdrops and save them as images.
#[derive(Parser, Debug)]
#[command(name = "backdrop", version, about)]
struct Cli {
    /// RON config file. Flags given on the command line override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Fewest shapes, bands or hills.
    #[arg(long)]
    min: Option<u32>,

    /// Most shapes, bands or hills.
    #[arg(long)]
    max: Option<u32>,

    /// Built-in palette name.
    #[arg(long, conflicts_with = "color")]
    palette: Option<String>,

    /// A CSS color; repeat to build a custom palette.
    #[arg(long)]
    color: Vec<String>,

    /// Shape size multiplier (geometric mode).
    #[arg(long)]
    size_scale: Option<f64>,

    /// Seed for reproducible output. Image `i` uses `seed + i`.
    #[arg(long)]
    seed: Option<u64>,

    /// How many images to make.
    #[arg(long, default_value_t = 1)]
    count: u32,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// JPEG quality, 1 to 100.
    #[arg(long, default_value_t = sink::DEFAULT_QUALITY)]
    quality: u8,

    /// Output format extension.
    #[arg(long, default_value = "jpg")]
    format: String,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<ComposerConfig> {
        let mut config = match &self.config {
            Some(path) => ComposerConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ComposerConfig::new(1000, 1000),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if (self.min.is_some() || self.max.is_some()) && !config.mode.uses_count() {
            warn!(mode = ?config.mode, "--min/--max have no effect in this mode");
        }
        if self.min.is_some() || self.max.is_some() {
            let fallback = config.count();
            config.count = Some(CountRange {
                min: self.min.unwrap_or(fallback.min),
                max: self.max.unwrap_or(fallback.max),
            });
        }
        if let Some(name) = &self.palette {
            config.palette = Some(PaletteSpec::Named(name.clone()));
        } else if !self.color.is_empty() {
            config.palette = Some(PaletteSpec::Colors(self.color.clone()));
        }
        if let Some(scale) = self.size_scale {
            config.size_scale = scale;
        }
        Ok(config)
    }

    fn seeds(&self) -> Vec<u64> {
        match self.seed {
            Some(seed) => (0..u64::from(self.count))
                .map(|i| seed.wrapping_add(i))
                .collect(),
            None => {
                let mut rng = random::from_entropy();
                (0..self.count).map(|_| rng.gen()).collect()
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default tracing subscriber")?;

    if cli.count == 0 {
        bail!("--count must be at least 1");
    }
    let config = cli.config()?;
    let palette = config.palette().context("resolving palette")?;
    info!(colors = palette.len(), "palette ready");
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let seeds = cli.seeds();
    info!(mode = ?config.mode, width = config.width, height = config.height, images = seeds.len(), "composing");

    let name = sink::timestamped_name(config.mode.file_prefix(), &cli.format);
    for (i, (canvas, seed)) in compose_many(&config, &seeds)
        .into_iter()
        .zip(&seeds)
        .enumerate()
    {
        let canvas = canvas.with_context(|| format!("composing image with seed {seed}"))?;
        let file = if seeds.len() > 1 {
            name.replacen(
                &format!(".{}", cli.format),
                &format!("_{i}.{}", cli.format),
                1,
            )
        } else {
            name.clone()
        };
        let path = cli.out_dir.join(file);
        sink::save(&canvas.flatten(), &path, cli.quality)
            .with_context(|| format!("saving {}", path.display()))?;
        println!("{}", path.display());
    }
    Ok(())
}
