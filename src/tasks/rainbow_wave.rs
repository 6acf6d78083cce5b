use crate::canvas::buffer::Canvas;
use crate::foundation::core::{Rgb8, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::foundation::error::SignResult;
use crate::foundation::math::wrap_index;
use crate::task::base::{Task, TaskInfo};

/// Concentric rings of a fixed palette flowing outward from the panel center.
pub struct RainbowWave {
    info: TaskInfo,
    palette: Vec<Rgb8>,
    frame: i64,
}

const PALETTE: [u32; 15] = [
    0xFF0000, 0xFF6000, 0xFFBF00, 0xB5FF00, 0x80FF00, 0x20FF00, 0x00FF40, 0x00FFFF, 0x009FFF,
    0x0040FF, 0x2000FF, 0x7F00FF, 0xDF00FF, 0xFF00BF, 0xFF0060,
];

const CENTER_X: f64 = (SCREEN_WIDTH as f64 - 1.0) / 2.0;
const CENTER_Y: f64 = (SCREEN_HEIGHT as f64 - 1.0) / 2.0;

impl RainbowWave {
    pub fn new() -> Self {
        Self {
            info: TaskInfo::new("Rainbow Wave", "Mac Coleman"),
            palette: Vec::new(),
            frame: 0,
        }
    }

    pub fn boxed() -> Box<dyn Task> {
        Box::new(Self::new())
    }

    /// Palette slot used for pixel `(x, y)` on frame `frame`.
    pub fn palette_index(x: usize, y: usize, frame: i64) -> usize {
        let dist = (CENTER_X - x as f64).hypot(CENTER_Y - y as f64);
        wrap_index((dist - frame as f64).floor() as i64, PALETTE.len())
    }
}

impl Default for RainbowWave {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for RainbowWave {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn prepare(&mut self) -> SignResult<bool> {
        self.frame = 0;
        self.palette = PALETTE.iter().map(|&c| Rgb8::from_packed(c)).collect();
        Ok(true)
    }

    fn draw_frame(&mut self, canvas: &mut Canvas, _delta_secs: f64) -> SignResult<bool> {
        if self.palette.is_empty() {
            return Ok(false);
        }
        for x in 0..SCREEN_WIDTH {
            for y in 0..SCREEN_HEIGHT {
                let color = self.palette[Self::palette_index(x, y, self.frame)];
                canvas.set(x as i32, y as i32, color);
            }
        }
        self.frame += 1;
        Ok(true)
    }

    fn teardown(&mut self, _forced: bool) {
        self.palette = Vec::new();
    }
}
