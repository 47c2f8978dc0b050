//! Turns geo_types geometry into tiny-skia paths.
//!
//! This is the only place canvas coordinates get rounded to whole pixels,
//! so rotated and interpolated shapes don't accumulate truncation error
//! before they reach the rasterizer.
use geo_types::{Coord, Geometry, LineString, Polygon};
use tiny_skia::{Path, PathBuilder};

fn pixel(c: &Coord<f64>) -> (f32, f32) {
    (c.x.round() as f32, c.y.round() as f32)
}

fn push_ring(pb: &mut PathBuilder, ring: &LineString<f64>, close: bool) {
    let mut coords = ring.coords();
    let Some(first) = coords.next() else {
        return;
    };
    let (x, y) = pixel(first);
    pb.move_to(x, y);
    for c in coords {
        let (x, y) = pixel(c);
        pb.line_to(x, y);
    }
    if close {
        pb.close();
    }
}

/// Trait to convert geometry into a raster path. `None` means there is
/// nothing to draw (empty or degenerate geometry).
pub trait ToRasterPath {
    fn to_raster_path(&self) -> Option<Path>;
}

impl ToRasterPath for Polygon<f64> {
    fn to_raster_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        push_ring(&mut pb, self.exterior(), true);
        for interior in self.interiors() {
            push_ring(&mut pb, interior, true);
        }
        pb.finish()
    }
}

/// Line strings stay open; they're meant for stroking.
impl ToRasterPath for LineString<f64> {
    fn to_raster_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        push_ring(&mut pb, self, false);
        pb.finish()
    }
}

impl ToRasterPath for Geometry<f64> {
    fn to_raster_path(&self) -> Option<Path> {
        match self {
            Geometry::Polygon(poly) => poly.to_raster_path(),
            Geometry::MultiPolygon(polys) => {
                let mut pb = PathBuilder::new();
                for poly in polys {
                    push_ring(&mut pb, poly.exterior(), true);
                    for interior in poly.interiors() {
                        push_ring(&mut pb, interior, true);
                    }
                }
                pb.finish()
            }
            Geometry::Rect(rect) => rect.to_polygon().to_raster_path(),
            Geometry::Triangle(tri) => tri.to_polygon().to_raster_path(),
            Geometry::LineString(ls) => ls.to_raster_path(),
            Geometry::MultiLineString(mls) => {
                let mut pb = PathBuilder::new();
                for ls in mls {
                    push_ring(&mut pb, ls, false);
                }
                pb.finish()
            }
            // Points and lines have no area to fill, collections aren't produced here.
            _ => None,
        }
    }
}
