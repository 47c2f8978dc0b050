use tracing::debug;

use super::check_dimensions;
use crate::canvas::Canvas;
use crate::errors::ComposeResult;
use crate::palette::{Palette, Rgb};
use crate::random::RandomSource;

/// Two distinct palette colors; the first runs along the top row.
pub fn plan_gradient<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<(Rgb, Rgb)> {
    check_dimensions(width, height)?;
    palette.ensure_not_empty()?;
    let (top, bottom) = palette.pick_two(rng);
    debug!(width, height, ?top, ?bottom, "planned gradient backdrop");
    Ok((top, bottom))
}

/// Vertical blend between two colors picked from `palette`.
pub fn compose_gradient<R: RandomSource + ?Sized>(
    width: u32,
    height: u32,
    palette: &Palette,
    rng: &mut R,
) -> ComposeResult<Canvas> {
    let (top, bottom) = plan_gradient(width, height, palette, rng)?;
    let mut canvas = Canvas::new(width, height, top)?;
    canvas.vertical_gradient(top, bottom);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;

    #[test]
    fn rows_run_from_top_to_bottom_color() {
        let mut rng = seeded(123);
        let palette = Palette::muted();
        let (top, bottom) = plan_gradient(30, 200, &palette, &mut seeded(123)).unwrap();
        let canvas = compose_gradient(30, 200, &palette, &mut rng).unwrap();
        let near = |x: u8, y: u8| (i16::from(x) - i16::from(y)).abs() <= 2;
        let first = canvas.pixel(15, 0).unwrap();
        let last = canvas.pixel(15, 199).unwrap();
        assert!(near(first.r, top.r) && near(first.g, top.g) && near(first.b, top.b));
        assert!(near(last.r, bottom.r) && near(last.g, bottom.g) && near(last.b, bottom.b));
        // rows are flat
        assert_eq!(canvas.pixel(0, 100), canvas.pixel(29, 100));
        assert!(canvas.is_opaque());
    }

    #[test]
    fn single_row_is_flat() {
        let palette = Palette::new(vec![Rgb::new(10, 20, 30), Rgb::new(200, 100, 0)]).unwrap();
        let canvas = compose_gradient(8, 1, &palette, &mut seeded(1)).unwrap();
        assert_eq!(canvas.pixel(0, 0), canvas.pixel(7, 0));
    }
}
