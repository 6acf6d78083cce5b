use sha2::Digest as _;

use crate::canvas::buffer::Canvas;
use crate::foundation::core::{FRAME_LEN, Rgb8, SCREEN_COLORS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::foundation::error::{SignError, SignResult};

/// Byte offset of channel `c` of pixel `(x, y)` in an encoded frame.
pub const fn offset(x: usize, y: usize, c: usize) -> usize {
    (x * SCREEN_HEIGHT + y) * SCREEN_COLORS + c
}

/// Encode a canvas into its `FRAME_LEN` byte wire form.
///
/// Iteration is x outer, y inner, channel innermost, so byte `offset(x, y, c)` is channel `c` of
/// pixel `(x, y)`.
pub fn encode(canvas: &Canvas) -> Vec<u8> {
    let mut out = Vec::with_capacity(FRAME_LEN);
    for px in canvas.pixels() {
        out.extend_from_slice(&px.to_array());
    }
    debug_assert_eq!(out.len(), FRAME_LEN);
    out
}

/// An encoded frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
}

impl Frame {
    /// Encode `canvas`.
    pub fn from_canvas(canvas: &Canvas) -> Self {
        Self {
            data: encode(canvas),
        }
    }

    /// An all-zero frame.
    pub fn blank() -> Self {
        Self {
            data: vec![0; FRAME_LEN],
        }
    }

    /// Wrap bytes received from elsewhere, checking the length.
    pub fn decode(bytes: &[u8]) -> SignResult<Self> {
        if bytes.len() != FRAME_LEN {
            return Err(SignError::FrameLength {
                expected: FRAME_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            data: bytes.to_vec(),
        })
    }

    /// Wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Read back pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb8> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let i = offset(x, y, 0);
        Some(Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Rebuild the canvas this frame was encoded from.
    pub fn to_canvas(&self) -> Canvas {
        let mut canvas = Canvas::new();
        for (i, px) in self.data.chunks_exact(SCREEN_COLORS).enumerate() {
            let (x, y) = (i / SCREEN_HEIGHT, i % SCREEN_HEIGHT);
            canvas.set(x as i32, y as i32, Rgb8::new(px[0], px[1], px[2]));
        }
        canvas
    }

    /// Row-major RGB image for previews, each LED drawn as a `scale x scale` block.
    ///
    /// A scale of zero is treated as one.
    pub fn to_rgb_image(&self, scale: u32) -> image::RgbImage {
        let scale = scale.max(1);
        let w = SCREEN_WIDTH as u32 * scale;
        let h = SCREEN_HEIGHT as u32 * scale;
        image::RgbImage::from_fn(w, h, |px, py| {
            let (x, y) = ((px / scale) as usize, (py / scale) as usize);
            let c = self.pixel(x, y).unwrap_or_default();
            image::Rgb(c.to_array())
        })
    }

    /// Lowercase hex SHA-256 of the wire bytes.
    pub fn digest_hex(&self) -> String {
        let digest = sha2::Sha256::digest(&self.data);
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frame.rs"]
mod tests;
