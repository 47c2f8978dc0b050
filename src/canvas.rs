//! Provides [`Canvas`], the RGBA raster a backdrop is composed on.
//!
//! A canvas always starts fully opaque, and every later fill is composited
//! source-over on top of it, so the alpha channel never drops below 255.
//! [`Canvas::flatten`] then throws alpha away and hands back a plain
//! `image::RgbImage` for the caller to decorate and save.
use geo_types::{Geometry, LineString};
use image::RgbImage;
use tiny_skia::{
    Color, FillRule, GradientStop, LineCap, LineJoin, LinearGradient, Paint, Pixmap, Point,
    SpreadMode, Stroke, Transform,
};

use crate::errors::{ComposeError, ComposeResult};
use crate::geometry::path::ToRasterPath;
use crate::palette::{Rgb, Rgba};

/// Refuse canvases beyond this many pixels (1 GiB of RGBA) instead of
/// letting the allocator abort the process.
pub const MAX_PIXELS: u64 = 1 << 28;

fn color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pixmap: Pixmap,
    anti_alias: bool,
}

impl Canvas {
    /// A `width` x `height` canvas filled with an opaque `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> ComposeResult<Canvas> {
        if width == 0 || height == 0 {
            return Err(ComposeError::InvalidDimension { width, height });
        }
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(ComposeError::AllocationFailure { width, height });
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(ComposeError::AllocationFailure { width, height })?;
        pixmap.fill(color(background.opaque()));
        Ok(Canvas {
            pixmap,
            anti_alias: true,
        })
    }

    /// Toggle edge anti-aliasing for subsequent draws. On by default.
    pub fn anti_alias(&mut self, anti_alias: bool) -> &mut Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn paint(&self, fill: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color(fill));
        paint.anti_alias = self.anti_alias;
        paint
    }

    /// Fills any area geometry, blending `fill` over what's already there.
    /// Parts outside the canvas are clipped; empty geometry is a no-op.
    pub fn fill(&mut self, geometry: &Geometry<f64>, fill: Rgba) -> &mut Self {
        if let Some(path) = geometry.to_raster_path() {
            let paint = self.paint(fill);
            self.pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        self
    }

    /// Strokes a line string with round caps and joins.
    pub fn stroke(&mut self, line: &LineString<f64>, fill: Rgba, width: f64) -> &mut Self {
        if let Some(path) = line.to_raster_path() {
            let paint = self.paint(fill);
            let stroke = Stroke {
                width: width.max(1.0) as f32,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        self
    }

    /// Paints the whole canvas with a vertical gradient, `top` on the first
    /// row and `bottom` on the last.
    pub fn vertical_gradient(&mut self, top: Rgb, bottom: Rgb) -> &mut Self {
        let height = self.height() as f32;
        if self.height() < 2 {
            self.pixmap.fill(color(top.opaque()));
            return self;
        }
        // Anchor on pixel centers so the end rows get the exact end colors.
        let shader = LinearGradient::new(
            Point::from_xy(0.0, 0.5),
            Point::from_xy(0.0, height - 0.5),
            vec![
                GradientStop::new(0.0, color(top.opaque())),
                GradientStop::new(1.0, color(bottom.opaque())),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        );
        match shader {
            Some(shader) => {
                let mut paint = Paint::default();
                paint.shader = shader;
                let area = tiny_skia::Rect::from_xywh(0.0, 0.0, self.width() as f32, height);
                if let Some(area) = area {
                    self.pixmap
                        .fill_rect(area, &paint, Transform::identity(), None);
                }
            }
            // Degenerate stops collapse to a flat fill.
            None => self.pixmap.fill(color(top.opaque())),
        }
        self
    }

    /// Straight-alpha pixel at `(x, y)`, `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        // Pixmap::pixel only checks the flat index, so x == width would
        // wrap onto the next row.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba {
                r: c.red(),
                g: c.green(),
                b: c.blue(),
                a: c.alpha(),
            }
        })
    }

    /// `true` when no pixel has any transparency left.
    pub fn is_opaque(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == u8::MAX)
    }

    /// Drops the alpha channel, keeping the already composited colors.
    pub fn flatten(&self) -> RgbImage {
        let width = self.width();
        let pixels = self.pixmap.pixels();
        RgbImage::from_fn(width, self.height(), |x, y| {
            let c = pixels[(y as usize) * (width as usize) + x as usize].demultiply();
            image::Rgb([c.red(), c.green(), c.blue()])
        })
    }

    pub fn as_pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shapes;

    #[test]
    fn zero_sides_are_rejected() {
        assert!(matches!(
            Canvas::new(0, 10, Rgb::WHITE),
            Err(ComposeError::InvalidDimension {
                width: 0,
                height: 10
            })
        ));
        assert!(matches!(
            Canvas::new(10, 0, Rgb::WHITE),
            Err(ComposeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn huge_canvases_fail_cleanly() {
        assert!(matches!(
            Canvas::new(u32::MAX, u32::MAX, Rgb::WHITE),
            Err(ComposeError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn background_fills_every_pixel() {
        let canvas = Canvas::new(7, 5, Rgb::new(250, 241, 248)).unwrap();
        assert_eq!(canvas.width(), 7);
        assert_eq!(canvas.height(), 5);
        assert_eq!(canvas.pixel(6, 4), Some(Rgb::new(250, 241, 248).opaque()));
        assert_eq!(canvas.pixel(7, 0), None);
        assert!(canvas.is_opaque());
    }

    #[test]
    fn pixel_past_the_right_edge_does_not_wrap() {
        let mut canvas = Canvas::new(4, 2, Rgb::WHITE).unwrap();
        canvas.anti_alias(false).fill(
            &Geometry::Polygon(shapes::square(0.0, 1.0, 1.0)),
            Rgb::new(255, 0, 0).opaque(),
        );
        assert_eq!(canvas.pixel(0, 1), Some(Rgb::new(255, 0, 0).opaque()));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.pixel(0, 2), None);
        assert_eq!(canvas.pixel(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn translucent_fill_blends_and_stays_opaque() {
        let mut canvas = Canvas::new(40, 40, Rgb::WHITE).unwrap();
        canvas.anti_alias(false).fill(
            &Geometry::Polygon(shapes::square(10.0, 10.0, 20.0)),
            Rgb::new(0, 0, 0).with_alpha(128),
        );
        let inside = canvas.pixel(20, 20).unwrap();
        assert_eq!(inside.a, 255);
        assert!(inside.r > 100 && inside.r < 155);
        assert_eq!(canvas.pixel(2, 2), Some(Rgb::WHITE.opaque()));
        assert!(canvas.is_opaque());
    }

    #[test]
    fn off_canvas_geometry_is_clipped() {
        let mut canvas = Canvas::new(20, 20, Rgb::WHITE).unwrap();
        canvas.fill(
            &Geometry::Polygon(shapes::square(-50.0, -50.0, 60.0)),
            Rgb::new(255, 0, 0).opaque(),
        );
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(255, 0, 0).opaque()));
        assert_eq!(canvas.pixel(19, 19), Some(Rgb::WHITE.opaque()));
    }

    #[test]
    fn flatten_keeps_size_and_colors() {
        let mut canvas = Canvas::new(16, 9, Rgb::new(245, 245, 245)).unwrap();
        canvas.fill(
            &Geometry::Polygon(shapes::rect(0.0, 0.0, 8.0, 9.0)),
            Rgb::new(12, 26, 34).opaque(),
        );
        let flat = canvas.flatten();
        assert_eq!(flat.dimensions(), (16, 9));
        assert_eq!(flat.get_pixel(2, 2).0, [12, 26, 34]);
        assert_eq!(flat.get_pixel(12, 2).0, [245, 245, 245]);
    }

    #[test]
    fn gradient_ends_on_the_chosen_colors() {
        let (top, bottom) = (Rgb::new(72, 120, 208), Rgb::new(238, 133, 74));
        let mut canvas = Canvas::new(4, 64, Rgb::WHITE).unwrap();
        canvas.vertical_gradient(top, bottom);
        let close = |a: Rgba, b: Rgb| {
            (i16::from(a.r) - i16::from(b.r)).abs() <= 2
                && (i16::from(a.g) - i16::from(b.g)).abs() <= 2
                && (i16::from(a.b) - i16::from(b.b)).abs() <= 2
        };
        assert!(close(canvas.pixel(0, 0).unwrap(), top));
        assert!(close(canvas.pixel(3, 63).unwrap(), bottom));
        assert!(canvas.is_opaque());
    }

    #[test]
    fn stroke_marks_pixels_along_the_line() {
        let mut canvas = Canvas::new(50, 50, Rgb::WHITE).unwrap();
        let line = LineString::from(vec![(0.0, 25.0), (50.0, 25.0)]);
        canvas.stroke(&line, Rgb::new(0, 0, 255).opaque(), 6.0);
        assert_eq!(canvas.pixel(25, 25), Some(Rgb::new(0, 0, 255).opaque()));
        assert_eq!(canvas.pixel(25, 5), Some(Rgb::WHITE.opaque()));
    }
}
