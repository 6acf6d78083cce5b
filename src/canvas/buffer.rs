use crate::foundation::core::{Rgb8, Rgba8, SCREEN_COLORS, SCREEN_HEIGHT, SCREEN_WIDTH};

/// A `SCREEN_WIDTH x SCREEN_HEIGHT` grid of [`Rgb8`] pixels.
///
/// Storage is x-major: pixel `(x, y)` lives at `x * SCREEN_HEIGHT + y`, which is also the order
/// the frame encoder walks. A canvas is always fully allocated and starts zeroed.
///
/// Coordinates are signed so tasks can compute positions that fall off the panel; writes outside
/// the grid are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Box<[Rgb8]>,
}

impl Canvas {
    /// Panel width in pixels.
    pub const WIDTH: usize = SCREEN_WIDTH;
    /// Panel height in pixels.
    pub const HEIGHT: usize = SCREEN_HEIGHT;
    /// Bytes per pixel.
    pub const COLORS: usize = SCREEN_COLORS;

    /// Allocate a zeroed canvas.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb8::BLACK; SCREEN_WIDTH * SCREEN_HEIGHT].into_boxed_slice(),
        }
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < SCREEN_WIDTH && y < SCREEN_HEIGHT).then_some(x * SCREEN_HEIGHT + y)
    }

    /// Return `true` when `(x, y)` addresses a pixel.
    pub fn contains(x: i32, y: i32) -> bool {
        Self::index(x, y).is_some()
    }

    /// Read a pixel, `None` when off the panel.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb8> {
        Self::index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite a pixel. Off-panel writes are no-ops.
    pub fn set(&mut self, x: i32, y: i32, color: impl Into<Rgb8>) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = color.into();
        }
    }

    /// Composite `color` over the current pixel. Off-panel writes are no-ops.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba8) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Write a packed `0xAARRGGBB` color (alpha 0 meaning opaque).
    pub fn set_packed(&mut self, x: i32, y: i32, argb: u32) {
        self.blend(x, y, Rgba8::from_packed_argb(argb));
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb8) {
        self.pixels.fill(color);
    }

    /// Zero every pixel.
    pub fn clear(&mut self) {
        self.fill(Rgb8::BLACK);
    }

    /// Return `true` when every channel of every pixel is zero.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| *p == Rgb8::BLACK)
    }

    /// Pixels in x-major order.
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Iterate `(x, y, pixel)` in x-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Rgb8)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .map(|(i, p)| (i / SCREEN_HEIGHT, i % SCREEN_HEIGHT, *p))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.pixels.iter().filter(|p| **p != Rgb8::BLACK).count();
        f.debug_struct("Canvas")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .field("lit", &lit)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/buffer.rs"]
mod tests;
