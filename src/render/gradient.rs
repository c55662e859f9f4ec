//! Hold connector rasterization: a trapezoid filled scanline by scanline with a sinusoidal
//! edge→center→edge gradient, outlined along its two slanted sides.

use crate::config::settings::RenderSettings;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::trunc_px;
use crate::render::composite::over_straight;
use crate::render::geometry::BarGeometry;
use crate::render::raster::Raster;
use std::f64::consts::PI;

/// Connector appearance derived from settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorStyle {
    /// Full connector width at scale 1 (`lnl_scale * note_width * note_size`).
    pub width: f64,
    /// Border line width in pixels.
    pub line_width: u32,
    /// Color at both ends.
    pub edge: Rgba8,
    /// Color at the midpoint.
    pub center: Rgba8,
    /// Border color.
    pub line: Rgba8,
}

impl From<&RenderSettings> for ConnectorStyle {
    fn from(s: &RenderSettings) -> Self {
        Self {
            width: s.lnl_scale * s.note_width * s.note_size,
            line_width: (s.note_size * 3.0).round().max(1.0) as u32,
            edge: s.edge_color,
            center: s.center_color,
            line: s.line_color,
        }
    }
}

/// `sin(ratio * π)`: 0 at both ends, 1 at the midpoint.
pub fn blend_factor(ratio: f64) -> f64 {
    (ratio * PI).sin()
}

/// Fill color of the scanline at `ratio` along the connector.
pub fn scanline_color(ratio: f64, edge: Rgba8, center: Rgba8) -> Rgba8 {
    edge.lerp(center, blend_factor(ratio))
}

/// Draw `bar` onto `frame`.
///
/// Spans and borders are painted into a transparent overlay, later writes replacing earlier
/// ones, and the overlay is composited onto the frame once.
pub fn draw_connector(frame: &mut Raster, bar: &BarGeometry, style: &ConnectorStyle) {
    let top_half = style.width * bar.top_scale / 2.0;
    let bottom_half = style.width * bar.bottom_scale / 2.0;
    let top = bar.top;
    let bottom = bar.shifted_bottom();

    let left = [
        Point::new(top.x - top_half, top.y),
        Point::new(bottom.x - bottom_half, bottom.y),
    ];
    let right = [
        Point::new(top.x + top_half, top.y),
        Point::new(bottom.x + bottom_half, bottom.y),
    ];

    let pad = f64::from(style.line_width);
    let Some(mut overlay) = Overlay::covering(frame, &[left[0], left[1], right[0], right[1]], pad)
    else {
        return;
    };

    let ty = top.y as i64;
    let by = bottom.y as i64;
    for y in ty..by {
        let r = 1.0 - (by - y) as f64 / (by - ty) as f64;
        let x1 = trunc_px((1.0 - r) * left[0].x + r * left[1].x);
        let x2 = trunc_px((1.0 - r) * right[0].x + r * right[1].x);
        let color = scanline_color(r, style.edge, style.center);
        overlay.hline(x1, x2, y, color);
    }

    overlay.thick_line(left[0], left[1], style.line_width, style.line);
    overlay.thick_line(right[0], right[1], style.line_width, style.line);
    overlay.composite_onto(frame);
}

/// Straight-alpha scratch area covering a clipped bounding box of the frame.
struct Overlay {
    x0: i64,
    y0: i64,
    width: i64,
    height: i64,
    data: Vec<Option<Rgba8>>,
}

impl Overlay {
    fn covering(frame: &Raster, pts: &[Point], pad: f64) -> Option<Self> {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in pts {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return None;
        }

        let x0 = ((min_x - pad).floor() as i64).max(0);
        let y0 = ((min_y - pad).floor() as i64).max(0);
        let x1 = ((max_x + pad).ceil() as i64 + 1).min(i64::from(frame.width));
        let y1 = ((max_y + pad).ceil() as i64 + 1).min(i64::from(frame.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let (width, height) = (x1 - x0, y1 - y0);
        Some(Self {
            x0,
            y0,
            width,
            height,
            data: vec![None; (width * height) as usize],
        })
    }

    fn set(&mut self, x: i64, y: i64, color: Rgba8) {
        let (lx, ly) = (x - self.x0, y - self.y0);
        if lx < 0 || ly < 0 || lx >= self.width || ly >= self.height {
            return;
        }
        self.data[(ly * self.width + lx) as usize] = Some(color);
    }

    fn hline(&mut self, x1: i64, x2: i64, y: i64, color: Rgba8) {
        if y < self.y0 || y >= self.y0 + self.height {
            return;
        }
        let lo = x1.min(x2).max(self.x0);
        let hi = x1.max(x2).min(self.x0 + self.width - 1);
        for x in lo..=hi {
            self.set(x, y, color);
        }
    }

    // Pixels within `width / 2` of the segment, with flat ends at `a` and `b`.
    fn thick_line(&mut self, a: Point, b: Point, width: u32, color: Rgba8) {
        let half = f64::from(width.max(1)) / 2.0;
        let xs = (a.x.min(b.x) - half).floor() as i64;
        let xe = (a.x.max(b.x) + half).ceil() as i64;
        let ys = (a.y.min(b.y) - half).floor() as i64;
        let ye = (a.y.max(b.y) + half).ceil() as i64;

        let xs = xs.max(self.x0);
        let xe = xe.min(self.x0 + self.width - 1);
        let ys = ys.max(self.y0);
        let ye = ye.min(self.y0 + self.height - 1);

        for y in ys..=ye {
            for x in xs..=xe {
                if dist_to_segment(Point::new(x as f64, y as f64), a, b)
                    .is_some_and(|d| d <= half)
                {
                    self.set(x, y, color);
                }
            }
        }
    }

    fn composite_onto(&self, frame: &mut Raster) {
        for ly in 0..self.height {
            for lx in 0..self.width {
                let Some(color) = self.data[(ly * self.width + lx) as usize] else {
                    continue;
                };
                let (x, y) = ((self.x0 + lx) as u32, (self.y0 + ly) as u32);
                let i = (y as usize * frame.width as usize + x as usize) * 4;
                let dst = [
                    frame.data[i],
                    frame.data[i + 1],
                    frame.data[i + 2],
                    frame.data[i + 3],
                ];
                frame.data[i..i + 4].copy_from_slice(&over_straight(dst, color.to_array()));
            }
        }
    }
}

// Perpendicular distance from `p` to `a`-`b`; `None` when `p` projects past either end.
fn dist_to_segment(p: Point, a: Point, b: Point) -> Option<f64> {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return Some((p - a).hypot());
    }
    let t = (p - a).dot(ab) / len2;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some((p - (a + ab * t)).hypot())
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
