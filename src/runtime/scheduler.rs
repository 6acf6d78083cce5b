use crate::config::SignConfig;
use crate::encode::frame::Frame;
use crate::task::handle::TaskHandle;
use crate::task::status::StatusText;
use crate::tasks::error::ErrorTask;

/// Something that happened during a tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum SchedulerEvent {
    /// Task prepared and became current.
    Started { task: String },
    /// Task declined or failed `prepare` and was passed over.
    Skipped { task: String },
    /// Task was torn down.
    Retired { task: String, forced: bool },
    /// Task faulted while drawing; the error screen replaces it.
    Faulted { task: String, message: String },
}

/// Output of one [`Scheduler::tick`].
#[derive(Clone, Debug)]
pub struct Tick {
    /// 0-based tick counter.
    pub index: u64,
    /// Frame to push to the panel.
    pub frame: Frame,
    /// Text for the LCD.
    pub status: StatusText,
    /// Title of the task that drew `frame`, if any.
    pub task: Option<String>,
    pub events: Vec<SchedulerEvent>,
}

/// Cycles through the active tasks.
///
/// A task stays current until its draw signal says it may be retired or its run time (from
/// [`SignConfig::run_secs_for`]) is used up; it is then torn down normally and the next task
/// is prepared. Tasks that decline `prepare` are skipped. A task that faults is torn down
/// forced and an [`ErrorTask`] runs in its place before the rotation resumes.
pub struct Scheduler {
    handles: Vec<TaskHandle>,
    cfg: SignConfig,
    next: usize,
    current: Option<usize>,
    error_screen: Option<TaskHandle>,
    ticks: u64,
}

impl Scheduler {
    pub fn new(handles: Vec<TaskHandle>, cfg: SignConfig) -> Self {
        Self {
            handles,
            cfg,
            next: 0,
            current: None,
            error_screen: None,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &SignConfig {
        &self.cfg
    }

    pub fn handles(&self) -> &[TaskHandle] {
        &self.handles
    }

    /// Title of whatever is on screen right now.
    pub fn current_title(&self) -> Option<&str> {
        if let Some(err) = &self.error_screen {
            return Some(err.title());
        }
        self.current.map(|i| self.handles[i].title())
    }

    /// Prepare the next task that accepts, trying each handle at most once.
    fn start_next(&mut self, events: &mut Vec<SchedulerEvent>) -> Option<usize> {
        let n = self.handles.len();
        for _ in 0..n {
            let i = self.next % n;
            self.next = (i + 1) % n;
            let handle = &mut self.handles[i];
            if handle.prepare() {
                tracing::info!(task = %handle.info(), "task started");
                events.push(SchedulerEvent::Started {
                    task: handle.title().to_owned(),
                });
                return Some(i);
            }
            events.push(SchedulerEvent::Skipped {
                task: handle.title().to_owned(),
            });
        }
        None
    }

    fn run_error_screen(
        &mut self,
        delta_secs: f64,
        events: &mut Vec<SchedulerEvent>,
    ) -> Option<Tick> {
        let handle = self.error_screen.as_mut()?;
        let keep_going = handle.draw(delta_secs).unwrap_or(false);
        let tick = Tick {
            index: self.ticks,
            frame: handle.frame(),
            status: handle.status(),
            task: Some(handle.title().to_owned()),
            events: std::mem::take(events),
        };
        if !keep_going || handle.elapsed_secs() >= handle.info().suggested_run_secs {
            handle.teardown(false);
            self.error_screen = None;
        }
        Some(tick)
    }

    /// Advance by one frame. `delta_secs` is the time since the previous tick.
    #[tracing::instrument(skip(self), fields(tick = self.ticks))]
    pub fn tick(&mut self, delta_secs: f64) -> Tick {
        let mut events = Vec::new();
        let tick = self.tick_inner(delta_secs, &mut events);
        self.ticks += 1;
        tick
    }

    fn tick_inner(&mut self, delta_secs: f64, events: &mut Vec<SchedulerEvent>) -> Tick {
        if let Some(tick) = self.run_error_screen(delta_secs, events) {
            return tick;
        }

        if self.current.is_none() {
            self.current = self.start_next(events);
        }
        let Some(i) = self.current else {
            return Tick {
                index: self.ticks,
                frame: Frame::blank(),
                status: StatusText::blank(),
                task: None,
                events: std::mem::take(events),
            };
        };

        let run_secs = self.cfg.run_secs_for(self.handles[i].info());
        let handle = &mut self.handles[i];
        let title = handle.title().to_owned();

        match handle.draw(delta_secs) {
            Ok(keep_going) => {
                let tick = Tick {
                    index: self.ticks,
                    frame: handle.frame(),
                    status: handle.status(),
                    task: Some(title.clone()),
                    events: Vec::new(),
                };
                if !keep_going || handle.elapsed_secs() >= run_secs {
                    handle.teardown(false);
                    tracing::info!(task = %title, frames = handle.frames_drawn(), "task retired");
                    events.push(SchedulerEvent::Retired {
                        task: title,
                        forced: false,
                    });
                    self.current = None;
                }
                Tick {
                    events: std::mem::take(events),
                    ..tick
                }
            }
            Err(err) => {
                let message = err.lcd_message();
                handle.teardown(true);
                self.current = None;
                events.push(SchedulerEvent::Faulted {
                    task: title.clone(),
                    message: message.clone(),
                });
                events.push(SchedulerEvent::Retired {
                    task: title,
                    forced: true,
                });

                let mut screen = TaskHandle::new(Box::new(ErrorTask::new(message)));
                if screen.prepare() {
                    self.error_screen = Some(screen);
                }
                self.run_error_screen(0.0, events).unwrap_or_else(|| Tick {
                    index: self.ticks,
                    frame: Frame::blank(),
                    status: StatusText::blank(),
                    task: None,
                    events: std::mem::take(events),
                })
            }
        }
    }

    /// Interrupt whatever is running. Subsequent ticks start the rotation again.
    pub fn shutdown(&mut self) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();
        if let Some(mut screen) = self.error_screen.take() {
            screen.teardown(true);
        }
        if let Some(i) = self.current.take() {
            let handle = &mut self.handles[i];
            handle.teardown(true);
            events.push(SchedulerEvent::Retired {
                task: handle.title().to_owned(),
                forced: true,
            });
        }
        events
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("tasks", &self.handles.len())
            .field("current", &self.current_title())
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
