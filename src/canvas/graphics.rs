//! Rasterization helpers. Everything here writes through [`Canvas::set`] or [`Canvas::blend`],
//! so shapes that cross the panel edge are clipped rather than rejected. Coordinates may lie
//! arbitrarily far off the panel; work is bounded by the panel size, not the shape size.

use crate::canvas::buffer::Canvas;
use crate::foundation::core::{Rgb8, Rgba8, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Set the whole panel to one color.
pub fn fill_screen(canvas: &mut Canvas, color: Rgb8) {
    canvas.fill(color);
}

/// Segments with an endpoint further than this outside the panel are clipped before
/// rasterizing.
const CLIP_MARGIN: i64 = 64;
/// Ellipses with a larger radius are rasterized per panel row and column instead of by
/// walking the whole outline.
const MAX_WALKED_RADIUS: i64 = 4096;

const PANEL_W: i64 = SCREEN_WIDTH as i64;
const PANEL_H: i64 = SCREEN_HEIGHT as i64;

fn plot(canvas: &mut Canvas, x: i64, y: i64, color: Rgb8) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        canvas.set(x, y, color);
    }
}

/// Liang-Barsky clip against the panel grown by [`CLIP_MARGIN`]. Segments already inside
/// that box come back untouched.
fn clip_segment(a: (i64, i64), b: (i64, i64)) -> Option<((i64, i64), (i64, i64))> {
    let (lo, hi_x, hi_y) = (-CLIP_MARGIN, PANEL_W + CLIP_MARGIN, PANEL_H + CLIP_MARGIN);
    let inside = |(x, y): (i64, i64)| (lo..=hi_x).contains(&x) && (lo..=hi_y).contains(&y);
    if inside(a) && inside(b) {
        return Some((a, b));
    }

    let (x0, y0) = (a.0 as f64, a.1 as f64);
    let (dx, dy) = (b.0 as f64 - x0, b.1 as f64 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, x0 - lo as f64),
        (dx, hi_x as f64 - x0),
        (-dy, y0 - lo as f64),
        (dy, hi_y as f64 - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| ((x0 + t * dx).round() as i64, (y0 + t * dy).round() as i64);
    Some((at(t0), at(t1)))
}

/// Bresenham line between two points.
///
/// The endpoint with the larger major-axis coordinate is not plotted, so polylines do not
/// double-draw their joints. Endpoints far off the panel are clipped first, so any
/// coordinates are accepted.
pub fn stroke_line(canvas: &mut Canvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb8) {
    let a = (i64::from(x1), i64::from(y1));
    let b = (i64::from(x2), i64::from(y2));
    let Some(((x1, y1), (x2, y2))) = clip_segment(a, b) else {
        return;
    };

    if (y2 - y1).abs() < (x2 - x1).abs() {
        if x1 > x2 {
            line_low(canvas, x2, y2, x1, y1, color);
        } else {
            line_low(canvas, x1, y1, x2, y2, color);
        }
    } else if y1 > y2 {
        line_high(canvas, x2, y2, x1, y1, color);
    } else {
        line_high(canvas, x1, y1, x2, y2, color);
    }
}

// |slope| < 1, x1 <= x2
fn line_low(canvas: &mut Canvas, x1: i64, y1: i64, x2: i64, y2: i64, color: Rgb8) {
    let dx = x2 - x1;
    let (dy, step) = if y2 < y1 { (y1 - y2, -1) } else { (y2 - y1, 1) };
    let mut d = 2 * dy - dx;
    let mut y = y1;
    for x in x1..x2 {
        plot(canvas, x, y, color);
        if d > 0 {
            y += step;
            d += 2 * (dy - dx);
        } else {
            d += 2 * dy;
        }
    }
}

// |slope| >= 1, y1 <= y2
fn line_high(canvas: &mut Canvas, x1: i64, y1: i64, x2: i64, y2: i64, color: Rgb8) {
    let dy = y2 - y1;
    let (dx, step) = if x2 < x1 { (x1 - x2, -1) } else { (x2 - x1, 1) };
    let mut d = 2 * dx - dy;
    let mut x = x1;
    for y in y1..y2 {
        plot(canvas, x, y, color);
        if d > 0 {
            x += step;
            d += 2 * (dx - dy);
        } else {
            d += 2 * dx;
        }
    }
}

/// Connect consecutive points with [`stroke_line`].
pub fn stroke_polyline(canvas: &mut Canvas, points: &[(i32, i32)], color: Rgb8) {
    for pair in points.windows(2) {
        let [(x1, y1), (x2, y2)] = [pair[0], pair[1]];
        stroke_line(canvas, x1, y1, x2, y2, color);
    }
}

/// Horizontal run from `xa` to `xb` inclusive, clamped to the panel.
fn span(canvas: &mut Canvas, xa: i64, xb: i64, y: i64, color: Rgb8) {
    if !(0..PANEL_H).contains(&y) {
        return;
    }
    for x in xa.min(xb).max(0)..=xa.max(xb).min(PANEL_W - 1) {
        plot(canvas, x, y, color);
    }
}

/// Outline of the rectangle with corners `(x1, y1)` and `(x2, y2)`, both inclusive.
pub fn stroke_rect(canvas: &mut Canvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb8) {
    let (left, right) = (i64::from(x1.min(x2)), i64::from(x1.max(x2)));
    let (top, bottom) = (i64::from(y1.min(y2)), i64::from(y1.max(y2)));

    span(canvas, left, right, top, color);
    span(canvas, left, right, bottom, color);
    for y in (top + 1).max(0)..bottom.min(PANEL_H) {
        plot(canvas, left, y, color);
        plot(canvas, right, y, color);
    }
}

/// Solid rectangle with corners `(x1, y1)` and `(x2, y2)`, both inclusive.
pub fn fill_rect(canvas: &mut Canvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb8) {
    let (top, bottom) = (i64::from(y1.min(y2)), i64::from(y1.max(y2)));
    for y in top.max(0)..=bottom.min(PANEL_H - 1) {
        span(canvas, i64::from(x1), i64::from(x2), y, color);
    }
}

/// Walk one quadrant of an axis-aligned ellipse with the midpoint algorithm, reporting each
/// `(dx, dy)` offset from the center. Radii must be non-negative and at most
/// [`MAX_WALKED_RADIUS`].
fn midpoint_ellipse(rx: i64, ry: i64, mut plot: impl FnMut(i64, i64)) {
    let (rx2, ry2) = (rx * rx, ry * ry);

    let mut x: i64 = 0;
    let mut y: i64 = ry;
    let mut dx = 2 * ry2 * x;
    let mut dy = 2 * rx2 * y;

    let mut d1 = ry2 as f64 - (rx2 * ry) as f64 + 0.25 * rx2 as f64;
    while dx < dy {
        plot(x, y);
        x += 1;
        dx += 2 * ry2;
        if d1 < 0.0 {
            d1 += (dx + ry2) as f64;
        } else {
            y -= 1;
            dy -= 2 * rx2;
            d1 += (dx - dy + ry2) as f64;
        }
    }

    let xf = x as f64 + 0.5;
    let yf = (y - 1) as f64;
    let mut d2 = ry2 as f64 * xf * xf + rx2 as f64 * yf * yf - (rx2 * ry2) as f64;
    while y >= 0 {
        plot(x, y);
        y -= 1;
        dy -= 2 * rx2;
        if d2 > 0.0 {
            d2 += (rx2 - dy) as f64;
        } else {
            x += 1;
            dx += 2 * ry2;
            d2 += (dx - dy + rx2) as f64;
        }
    }
}

/// Half the ellipse's extent along the other axis at offset `d` along an axis with radius
/// `r_along`, or `None` when `d` lies outside the ellipse.
fn half_extent(d: i64, r_along: i64, r_other: i64) -> Option<f64> {
    if r_along == 0 {
        return (d == 0).then_some(r_other as f64);
    }
    let t = d as f64 / r_along as f64;
    let k = 1.0 - t * t;
    (k >= 0.0).then(|| r_other as f64 * k.sqrt())
}

struct Ellipse {
    cx: i64,
    cy: i64,
    rx: i64,
    ry: i64,
}

impl Ellipse {
    fn new(cx: i32, cy: i32, rx: i32, ry: i32) -> Self {
        Self {
            cx: i64::from(cx),
            cy: i64::from(cy),
            rx: i64::from(rx).abs(),
            ry: i64::from(ry).abs(),
        }
    }

    fn misses_panel(&self) -> bool {
        self.cx + self.rx < 0
            || self.cx - self.rx >= PANEL_W
            || self.cy + self.ry < 0
            || self.cy - self.ry >= PANEL_H
    }

    fn is_walkable(&self) -> bool {
        self.rx.max(self.ry) <= MAX_WALKED_RADIUS
    }
}

/// Outline of an ellipse centered at `(cx, cy)`.
pub fn stroke_ellipse(canvas: &mut Canvas, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgb8) {
    let e = Ellipse::new(cx, cy, rx, ry);
    if e.misses_panel() {
        return;
    }
    if e.is_walkable() {
        midpoint_ellipse(e.rx, e.ry, |x, y| {
            plot(canvas, e.cx + x, e.cy + y, color);
            plot(canvas, e.cx - x, e.cy + y, color);
            plot(canvas, e.cx + x, e.cy - y, color);
            plot(canvas, e.cx - x, e.cy - y, color);
        });
        return;
    }

    for x in 0..PANEL_W {
        if let Some(h) = half_extent(x - e.cx, e.rx, e.ry) {
            plot(canvas, x, (e.cy as f64 - h).round() as i64, color);
            plot(canvas, x, (e.cy as f64 + h).round() as i64, color);
        }
    }
    for y in 0..PANEL_H {
        if let Some(w) = half_extent(y - e.cy, e.ry, e.rx) {
            plot(canvas, (e.cx as f64 - w).round() as i64, y, color);
            plot(canvas, (e.cx as f64 + w).round() as i64, y, color);
        }
    }
}

/// Solid ellipse centered at `(cx, cy)`.
pub fn fill_ellipse(canvas: &mut Canvas, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgb8) {
    let e = Ellipse::new(cx, cy, rx, ry);
    if e.misses_panel() {
        return;
    }
    if e.is_walkable() {
        midpoint_ellipse(e.rx, e.ry, |x, y| {
            span(canvas, e.cx - x, e.cx + x, e.cy + y, color);
            span(canvas, e.cx - x, e.cx + x, e.cy - y, color);
        });
        return;
    }

    for y in 0..PANEL_H {
        if let Some(w) = half_extent(y - e.cy, e.ry, e.rx) {
            let left = (e.cx as f64 - w).round() as i64;
            let right = (e.cx as f64 + w).round() as i64;
            span(canvas, left, right, y, color);
        }
    }
}

pub fn stroke_circle(canvas: &mut Canvas, cx: i32, cy: i32, radius: i32, color: Rgb8) {
    stroke_ellipse(canvas, cx, cy, radius, radius, color);
}

pub fn fill_circle(canvas: &mut Canvas, cx: i32, cy: i32, radius: i32, color: Rgb8) {
    fill_ellipse(canvas, cx, cy, radius, radius, color);
}

/// Composite `image` with its top-left corner at `(x, y)`.
///
/// Each pixel is blended with its own alpha, so fully transparent pixels leave the canvas
/// untouched and opaque ones overwrite it. Parts of the image off the panel are skipped.
pub fn draw_image(canvas: &mut Canvas, x: i32, y: i32, image: &image::RgbaImage) {
    let (x, y) = (i64::from(x), i64::from(y));
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));

    for py in y.max(0)..(y + h).min(PANEL_H) {
        for px in x.max(0)..(x + w).min(PANEL_W) {
            let (sx, sy) = ((px - x) as u32, (py - y) as u32);
            let image::Rgba([r, g, b, a]) = *image.get_pixel(sx, sy);
            if let (Ok(cx), Ok(cy)) = (i32::try_from(px), i32::try_from(py)) {
                canvas.blend(cx, cy, Rgba8 { r, g, b, a });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/graphics.rs"]
mod tests;
