pub use csscolorparser::parse as parse_css_color;
use serde::{Deserialize, Serialize};

use crate::errors::{ComposeError, ComposeResult};
use crate::random::RandomSource;

/// An opaque 8-bit color.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color with straight (non-premultiplied) alpha.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const fn opaque(self) -> Rgba {
        self.with_alpha(255)
    }

    /// Channel-wise blend, `t = 0` is `self` and `t = 1` is `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Parse any CSS color string (`"#ffb3ba"`, `"rgb(255 179 186)"`, `"teal"`).
    /// Alpha is dropped.
    pub fn from_css(css: &str) -> ComposeResult<Rgb> {
        let color = parse_css_color(css)
            .map_err(|err| ComposeError::palette(format!("can't parse color {css:?}: {err}")))?;
        let [r, g, b, _a] = color.to_rgba8();
        Ok(Rgb::new(r, g, b))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

const PASTEL: [(u8, u8, u8); 9] = [
    (255, 179, 186),
    (255, 223, 186),
    (255, 255, 186),
    (186, 255, 201),
    (186, 225, 255),
    (221, 201, 255),
    (200, 200, 255),
    (255, 200, 255),
    (200, 255, 240),
];

const DUSK: [(u8, u8, u8); 9] = [
    (62, 33, 97),
    (137, 79, 166),
    (203, 78, 145),
    (245, 121, 148),
    (246, 132, 178),
    (244, 98, 108),
    (182, 97, 184),
    (71, 88, 153),
    (110, 98, 157),
];

const OCEAN: [(u8, u8, u8); 9] = [
    (17, 42, 53),   // deep teal
    (68, 87, 104),  // slate blue-green
    (193, 103, 88), // warm coral
    (12, 26, 34),   // midnight blue
    (34, 73, 91),   // ocean slate
    (244, 147, 97), // sunset peach
    (103, 120, 121),
    (124, 161, 161),
    (46, 52, 59),
];

// seaborn's "muted" qualitative palette
const MUTED: [(u8, u8, u8); 10] = [
    (72, 120, 208),
    (238, 133, 74),
    (106, 204, 100),
    (214, 95, 95),
    (149, 108, 180),
    (140, 97, 60),
    (220, 126, 192),
    (121, 121, 121),
    (213, 187, 103),
    (130, 198, 226),
];

/// Names accepted by [`Palette::named`].
pub const PALETTE_NAMES: [&str; 4] = ["pastel", "dusk", "ocean", "muted"];

/// An ordered, non-empty set of candidate fill colors.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Palette(Vec<Rgb>);

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> ComposeResult<Palette> {
        if colors.is_empty() {
            return Err(ComposeError::EmptyPalette);
        }
        Ok(Palette(colors))
    }

    /// Soft pastels, the default for shapes and waves.
    pub fn pastel() -> Palette {
        Palette(PASTEL.iter().copied().map(Rgb::from).collect())
    }

    /// Deep purples and pinks, the default for landscapes.
    pub fn dusk() -> Palette {
        Palette(DUSK.iter().copied().map(Rgb::from).collect())
    }

    pub fn ocean() -> Palette {
        Palette(OCEAN.iter().copied().map(Rgb::from).collect())
    }

    /// Mid-saturation colors, the default for gradients.
    pub fn muted() -> Palette {
        Palette(MUTED.iter().copied().map(Rgb::from).collect())
    }

    pub fn named(name: &str) -> ComposeResult<Palette> {
        match name.to_ascii_lowercase().as_str() {
            "pastel" => Ok(Palette::pastel()),
            "dusk" => Ok(Palette::dusk()),
            "ocean" => Ok(Palette::ocean()),
            "muted" => Ok(Palette::muted()),
            other => Err(ComposeError::palette(format!(
                "unknown palette {other:?} (expected one of {})",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    pub fn from_css<S: AsRef<str>>(colors: &[S]) -> ComposeResult<Palette> {
        let colors = colors
            .iter()
            .map(|css| Rgb::from_css(css.as_ref()))
            .collect::<ComposeResult<Vec<Rgb>>>()?;
        Palette::new(colors)
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deserialized palettes bypass [`Palette::new`], so composers check again.
    pub fn ensure_not_empty(&self) -> ComposeResult<()> {
        if self.0.is_empty() {
            return Err(ComposeError::EmptyPalette);
        }
        Ok(())
    }

    /// Uniformly random entry.
    pub fn pick<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Rgb {
        rng.choose(&self.0).copied().unwrap_or(Rgb::WHITE)
    }

    /// Two entries sampled without replacement. A single-color palette
    /// returns that color twice.
    pub fn pick_two<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (Rgb, Rgb) {
        let n = self.0.len() as i64;
        if n < 2 {
            let only = self.pick(rng);
            return (only, only);
        }
        let first = rng.uniform_int(0, n - 1);
        let mut second = rng.uniform_int(0, n - 2);
        if second >= first {
            second += 1;
        }
        (self.0[first as usize], self.0[second as usize])
    }
}

/// A near-white backdrop color, each channel in `[240, 255]`.
pub fn near_white<R: RandomSource + ?Sized>(rng: &mut R) -> Rgb {
    let mut channel = || rng.uniform_int(240, 255) as u8;
    let r = channel();
    let g = channel();
    let b = channel();
    Rgb::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;

    #[test]
    fn builtin_palettes_resolve_by_name() {
        for name in PALETTE_NAMES {
            let palette = Palette::named(name).unwrap();
            assert!(!palette.is_empty());
        }
        assert_eq!(Palette::named("Pastel").unwrap(), Palette::pastel());
        assert!(matches!(
            Palette::named("neon"),
            Err(ComposeError::Palette(_))
        ));
    }

    #[test]
    fn css_colors_parse() {
        let palette = Palette::from_css(&["#ffb3ba", "rgb(186, 225, 255)", "white"]).unwrap();
        assert_eq!(
            palette.colors(),
            &[
                Rgb::new(255, 179, 186),
                Rgb::new(186, 225, 255),
                Rgb::new(255, 255, 255)
            ]
        );
        assert!(Palette::from_css(&["not-a-color"]).is_err());
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            Palette::new(vec![]),
            Err(ComposeError::EmptyPalette)
        ));
        let none: [&str; 0] = [];
        assert!(matches!(
            Palette::from_css(&none),
            Err(ComposeError::EmptyPalette)
        ));
    }

    #[test]
    fn pick_two_never_repeats() {
        let mut rng = seeded(5);
        let palette = Palette::muted();
        for _ in 0..500 {
            let (a, b) = palette.pick_two(&mut rng);
            assert_ne!(a, b);
        }
        let single = Palette::new(vec![Rgb::new(1, 2, 3)]).unwrap();
        assert_eq!(
            single.pick_two(&mut rng),
            (Rgb::new(1, 2, 3), Rgb::new(1, 2, 3))
        );
    }

    #[test]
    fn near_white_stays_near_white() {
        let mut rng = seeded(11);
        for _ in 0..200 {
            let c = near_white(&mut rng);
            assert!(c.r >= 240 && c.g >= 240 && c.b >= 240);
        }
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 100, 100));
    }
}
