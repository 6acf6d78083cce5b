use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::canvas::buffer::Canvas;
use crate::encode::frame::Frame;
use crate::foundation::error::{SignError, SignResult};
use crate::task::base::{Task, TaskInfo};
use crate::task::status::StatusText;

/// Where a task is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LifecycleState {
    /// Constructed, or declined/failed its last `prepare`.
    Created,
    /// `prepare` succeeded, no frame drawn yet.
    Prepared,
    /// At least one frame drawn since `prepare`.
    Running,
    /// Faulted while drawing; only `teardown` is accepted.
    Faulted,
    /// Retired. A new `prepare` starts a fresh run.
    TornDown,
}

/// A task together with the lifecycle bookkeeping the caller interacts with.
///
/// This is the per-task surface exposed to the orchestrator: `prepare`, `draw`, `teardown`,
/// `retrieve_frame` and `status_text`. Errors and panics raised by the task are caught here and
/// reported against this handle only.
pub struct TaskHandle {
    task: Box<dyn Task>,
    state: LifecycleState,
    canvas: Option<Canvas>,
    fault: Option<String>,
    frames_drawn: u64,
    elapsed_secs: f64,
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_owned()
    }
}

/// Run `f`, turning a panic into an error message.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|p| panic_message(p.as_ref()))
}

impl TaskHandle {
    pub fn new(task: Box<dyn Task>) -> Self {
        Self {
            task,
            state: LifecycleState::Created,
            canvas: None,
            fault: None,
            frames_drawn: 0,
            elapsed_secs: 0.0,
        }
    }

    pub fn info(&self) -> &TaskInfo {
        self.task.info()
    }

    pub fn title(&self) -> &str {
        &self.info().title
    }

    pub fn artist(&self) -> &str {
        &self.info().artist
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Frames drawn since the last `prepare`.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Sum of the deltas passed to `draw` since the last `prepare`.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Message of the fault that stopped the current run, if any.
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// Start a run. Returns `false` when the task should be skipped this time.
    ///
    /// A task that declines, returns an error, or panics stays in [`LifecycleState::Created`].
    /// Preparing a task that is still active tears it down (forced) first.
    #[tracing::instrument(skip(self), fields(task = %self.title()))]
    pub fn prepare(&mut self) -> bool {
        if matches!(
            self.state,
            LifecycleState::Prepared | LifecycleState::Running | LifecycleState::Faulted
        ) {
            tracing::debug!(state = ?self.state, "re-preparing an active task");
            self.teardown(true);
        }

        self.canvas = Some(Canvas::new());
        self.fault = None;
        self.frames_drawn = 0;
        self.elapsed_secs = 0.0;

        let ready = match guarded(|| self.task.prepare()) {
            Ok(Ok(ready)) => ready,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "prepare failed; skipping task");
                false
            }
            Err(msg) => {
                tracing::warn!(panic = %msg, "prepare panicked; skipping task");
                false
            }
        };

        if ready {
            self.state = LifecycleState::Prepared;
        } else {
            self.canvas = None;
            self.state = LifecycleState::Created;
            tracing::debug!("task declined this run");
        }
        ready
    }

    /// Render the next frame into a fresh zeroed canvas.
    ///
    /// Returns the task's draw signal: `true` to keep scheduling, `false` when it may be
    /// retired. Negative or non-finite deltas are treated as zero.
    pub fn draw(&mut self, delta_secs: f64) -> SignResult<bool> {
        match self.state {
            LifecycleState::Prepared | LifecycleState::Running => {}
            LifecycleState::Faulted => {
                return Err(SignError::task_fault(
                    self.title(),
                    self.fault.clone().unwrap_or_default(),
                ));
            }
            LifecycleState::Created | LifecycleState::TornDown => {
                return Err(SignError::lifecycle(format!(
                    "draw called on '{}' in state {:?}",
                    self.title(),
                    self.state
                )));
            }
        }

        let delta = if delta_secs.is_finite() {
            delta_secs.max(0.0)
        } else {
            0.0
        };
        self.elapsed_secs += delta;

        let mut canvas = Canvas::new();
        let outcome = guarded(|| self.task.draw_frame(&mut canvas, delta));
        let message = match outcome {
            Ok(Ok(keep_going)) => {
                self.canvas = Some(canvas);
                self.frames_drawn += 1;
                self.state = LifecycleState::Running;
                return Ok(keep_going);
            }
            Ok(Err(err)) => err.lcd_message(),
            Err(panic) => panic,
        };

        tracing::error!(task = %self.title(), fault = %message, "task faulted while drawing");
        self.state = LifecycleState::Faulted;
        self.canvas = None;
        self.fault = Some(message.clone());
        Err(SignError::task_fault(self.title(), message))
    }

    /// Retire the task. Repeated calls, or calls on a task that never started, are no-ops.
    #[tracing::instrument(skip(self), fields(task = %self.title()))]
    pub fn teardown(&mut self, forced: bool) {
        match self.state {
            LifecycleState::Created | LifecycleState::TornDown => {
                tracing::debug!(state = ?self.state, "teardown ignored");
                return;
            }
            LifecycleState::Prepared | LifecycleState::Running | LifecycleState::Faulted => {}
        }

        if let Err(msg) = guarded(|| self.task.teardown(forced)) {
            tracing::warn!(panic = %msg, "teardown panicked");
        }
        self.canvas = None;
        self.state = LifecycleState::TornDown;
    }

    /// The most recent frame in wire form.
    ///
    /// All zero before the first draw, after a draw that faulted, and after teardown.
    pub fn retrieve_frame(&self) -> Vec<u8> {
        self.frame().into_bytes()
    }

    /// The most recent frame.
    pub fn frame(&self) -> Frame {
        match &self.canvas {
            Some(canvas) if self.frames_drawn > 0 => Frame::from_canvas(canvas),
            _ => Frame::blank(),
        }
    }

    /// Both LCD lines.
    pub fn status(&self) -> StatusText {
        match &self.fault {
            Some(msg) => StatusText::message(msg),
            None => guarded(|| self.task.status_text())
                .unwrap_or_else(|msg| StatusText::message(&msg)),
        }
    }

    /// Both LCD lines concatenated, `2 * LCD_WIDTH` characters.
    pub fn status_text(&self) -> String {
        self.status().concat()
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("title", &self.title())
            .field("state", &self.state)
            .field("frames_drawn", &self.frames_drawn)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/task/handle.rs"]
mod tests;
