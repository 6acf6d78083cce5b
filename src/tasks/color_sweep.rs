use crate::canvas::buffer::Canvas;
use crate::canvas::graphics::fill_screen;
use crate::foundation::core::Rgb8;
use crate::foundation::error::SignResult;
use crate::task::base::{Task, TaskInfo};

/// Whole-panel fade from blue to red.
pub struct ColorSweep {
    info: TaskInfo,
    level: u8,
}

const STEP: u8 = 4;

impl ColorSweep {
    pub fn new() -> Self {
        Self {
            info: TaskInfo::new("Demo", "Mac Coleman"),
            level: 0,
        }
    }

    pub fn boxed() -> Box<dyn Task> {
        Box::new(Self::new())
    }
}

impl Default for ColorSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for ColorSweep {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn prepare(&mut self) -> SignResult<bool> {
        self.level = 0;
        Ok(true)
    }

    fn draw_frame(&mut self, canvas: &mut Canvas, _delta_secs: f64) -> SignResult<bool> {
        fill_screen(canvas, Rgb8::new(self.level, 0, 255 - self.level));
        self.level = ((u16::from(self.level) + u16::from(STEP)) % 255) as u8;
        Ok(true)
    }
}
