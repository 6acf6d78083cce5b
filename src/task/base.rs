use crate::canvas::buffer::Canvas;
use crate::foundation::error::SignResult;
use crate::task::status::{StatusText, render_status};

/// Seconds a task stays on screen before the scheduler rotates to the next one.
pub const DEFAULT_RUN_SECS: f64 = 30.0;

/// Identity and scheduling metadata of a task.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TaskInfo {
    /// Shown on the first LCD line.
    pub title: String,
    /// Shown on the second LCD line after `"By: "`.
    pub artist: String,
    /// How long the scheduler keeps the task on screen, in seconds.
    pub suggested_run_secs: f64,
}

impl TaskInfo {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            suggested_run_secs: DEFAULT_RUN_SECS,
        }
    }

    pub fn with_run_secs(mut self, secs: f64) -> Self {
        self.suggested_run_secs = secs;
        self
    }
}

impl Default for TaskInfo {
    fn default() -> Self {
        Self::new("Unknown", "Unknown")
    }
}

impl std::fmt::Display for TaskInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

/// A self-contained animation.
///
/// The caller drives it as `prepare`, then any number of `draw_frame` calls, then exactly one
/// `teardown`. Every `draw_frame` receives a freshly zeroed canvas; anything that must survive
/// between frames belongs in the task's own fields.
///
/// # Draw signal
///
/// `draw_frame` returns `Ok(true)` when it rendered a frame and wants to keep being scheduled,
/// and `Ok(false)` when it has nothing further to contribute and may be retired. An `Err` is a
/// fault of this task only; the caller isolates it from every other task.
pub trait Task {
    /// Identity and scheduling metadata.
    fn info(&self) -> &TaskInfo;

    /// One-time setup before the first frame of a run.
    ///
    /// Returning `Ok(false)` asks to be skipped for this run, e.g. because there is nothing
    /// worth showing right now.
    fn prepare(&mut self) -> SignResult<bool> {
        Ok(true)
    }

    /// Render one frame into `canvas`. `delta_secs` is the time since the previous frame.
    fn draw_frame(&mut self, canvas: &mut Canvas, delta_secs: f64) -> SignResult<bool>;

    /// Release anything acquired in `prepare` or while drawing.
    ///
    /// `forced` is `true` when the task is interrupted rather than retired normally. May be
    /// called more than once.
    fn teardown(&mut self, forced: bool) {
        let _ = forced;
    }

    /// Text for the status LCD.
    fn status_text(&self) -> StatusText {
        let info = self.info();
        render_status(&info.title, &info.artist)
    }
}
