/// Width of the LED matrix in pixels.
pub const SCREEN_WIDTH: usize = 32;
/// Height of the LED matrix in pixels.
pub const SCREEN_HEIGHT: usize = 32;
/// Bytes per pixel.
pub const SCREEN_COLORS: usize = 3;
/// Characters per line on the status LCD.
pub const LCD_WIDTH: usize = 16;

/// Length in bytes of one encoded frame.
pub const FRAME_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT * SCREEN_COLORS;
/// Length in characters of the concatenated two-line status text.
pub const STATUS_LEN: usize = 2 * LCD_WIDTH;

/// One pixel: three bytes in the order the task writes them (nominally R, G, B).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    /// Channel 0.
    pub r: u8,
    /// Channel 1.
    pub g: u8,
    /// Channel 2.
    pub b: u8,
}

impl Rgb8 {
    /// All channels zero.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a pixel from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` integer. Bits above the low 24 are ignored.
    pub const fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Channels in write order.
    pub const fn to_array(self) -> [u8; SCREEN_COLORS] {
        [self.r, self.g, self.b]
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl From<[u8; SCREEN_COLORS]> for Rgb8 {
    fn from([r, g, b]: [u8; SCREEN_COLORS]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for [u8; SCREEN_COLORS] {
    fn from(c: Rgb8) -> Self {
        c.to_array()
    }
}

/// Straight (non-premultiplied) RGBA8, used for blended writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Coverage, 255 is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Unpack a `0xAARRGGBB` integer.
    ///
    /// An alpha byte of zero is read as "no alpha given" and yields an opaque color, so plain
    /// `0xRRGGBB` literals keep working.
    pub const fn from_packed_argb(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xFF) as u8;
        Rgb8::from_packed(argb).with_alpha(if a == 0 { 255 } else { a })
    }

    /// Drop the alpha channel.
    pub const fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    /// Composite this color over `dst`.
    pub fn over(self, dst: Rgb8) -> Rgb8 {
        fn mix(src: u8, dst: u8, a: u16) -> u8 {
            let v = u16::from(src) * a + u16::from(dst) * (255 - a);
            ((v + 127) / 255) as u8
        }

        let a = u16::from(self.a);
        Rgb8 {
            r: mix(self.r, dst.r, a),
            g: mix(self.g, dst.g, a),
            b: mix(self.b, dst.b, a),
        }
    }
}

/// The sign's standard palette.
pub mod palette {
    use super::Rgb8;

    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const RED: Rgb8 = Rgb8::new(255, 69, 58);
    pub const ORANGE: Rgb8 = Rgb8::new(255, 159, 10);
    pub const YELLOW: Rgb8 = Rgb8::new(255, 214, 10);
    pub const GREEN: Rgb8 = Rgb8::new(50, 215, 75);
    pub const MINT: Rgb8 = Rgb8::new(102, 212, 207);
    pub const TEAL: Rgb8 = Rgb8::new(106, 196, 220);
    pub const CYAN: Rgb8 = Rgb8::new(90, 200, 245);
    pub const BLUE: Rgb8 = Rgb8::new(10, 132, 255);
    pub const INDIGO: Rgb8 = Rgb8::new(94, 92, 230);
    pub const PURPLE: Rgb8 = Rgb8::new(191, 90, 242);
    pub const PINK: Rgb8 = Rgb8::new(255, 55, 95);
    pub const BROWN: Rgb8 = Rgb8::new(172, 142, 104);
    pub const GRAY: Rgb8 = Rgb8::new(152, 152, 157);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
