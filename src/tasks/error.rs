use crate::canvas::buffer::Canvas;
use crate::canvas::graphics::{fill_rect, stroke_line, stroke_rect};
use crate::foundation::core::{Rgb8, SCREEN_HEIGHT, SCREEN_WIDTH, palette};
use crate::foundation::error::SignResult;
use crate::task::base::{Task, TaskInfo};
use crate::task::status::StatusText;

/// Seconds the error screen stays up before the rotation resumes.
pub const ERROR_RUN_SECS: f64 = 10.0;

/// Screen shown in place of a task that faulted. Never registered; the scheduler builds it on
/// demand.
pub struct ErrorTask {
    info: TaskInfo,
    message: String,
    elapsed_secs: f64,
}

impl ErrorTask {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            info: TaskInfo::new("Error :(", "c4sign").with_run_secs(ERROR_RUN_SECS),
            message: message.into(),
            elapsed_secs: 0.0,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Task for ErrorTask {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn prepare(&mut self) -> SignResult<bool> {
        self.elapsed_secs = 0.0;
        Ok(true)
    }

    fn draw_frame(&mut self, canvas: &mut Canvas, delta_secs: f64) -> SignResult<bool> {
        self.elapsed_secs += delta_secs;
        let (w, h) = (SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32);

        stroke_rect(canvas, 0, 0, w - 1, h - 1, palette::RED);
        stroke_line(canvas, 8, 8, w - 8, h - 8, palette::RED);
        stroke_line(canvas, w - 9, 8, 7, h - 8, palette::RED);

        // progress bar along the bottom edge
        let ticks = ((self.elapsed_secs / ERROR_RUN_SECS) * f64::from(w - 2)).floor() as i32;
        if ticks > 0 {
            fill_rect(canvas, 1, h - 3, ticks.min(w - 2), h - 2, Rgb8::new(90, 0, 0));
        }
        Ok(true)
    }

    fn status_text(&self) -> StatusText {
        StatusText::message(&self.message)
    }
}
