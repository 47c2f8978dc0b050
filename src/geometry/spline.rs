use geo_types::{coord, Coord};

/// Points per segment used by the smoothed wave bands.
pub const SEGMENT_POINTS: usize = 20;

/// Samples the uniform Catmull-Rom segment between `p1` and `p2` at
/// `n` evenly spaced parameters `t = i / (n - 1)`.
///
/// The curve passes through `p1` at `t = 0` and `p2` at `t = 1`; `p0` and
/// `p3` only shape the tangents.
pub fn catmull_rom(p0: Coord, p1: Coord, p2: Coord, p3: Coord, n: usize) -> Vec<Coord> {
    match n {
        0 => return vec![],
        1 => return vec![p1],
        _ => {}
    }
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            coord! {
                x: catmull_rom_axis(p0.x, p1.x, p2.x, p3.x, t),
                y: catmull_rom_axis(p0.y, p1.y, p2.y, p3.y, t),
            }
        })
        .collect()
}

fn catmull_rom_axis(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Runs [`catmull_rom`] over every window of four consecutive control
/// points and concatenates the segments. The first and last control points
/// are only used as tangent guides, so fewer than four points yields nothing.
pub fn catmull_rom_chain(controls: &[Coord], points_per_segment: usize) -> Vec<Coord> {
    controls
        .windows(4)
        .flat_map(|w| catmull_rom(w[0], w[1], w[2], w[3], points_per_segment))
        .collect()
}
