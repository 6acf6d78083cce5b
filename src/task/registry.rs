use crate::task::base::{Task, TaskInfo};
use crate::task::handle::TaskHandle;
use crate::tasks;

/// One entry of a task table: a constructor plus whether the task should run at all.
#[derive(Clone, Copy)]
pub struct TaskFactory {
    /// Disabled entries are kept for reference but never handed out.
    pub enabled: bool,
    /// Builds a fresh instance.
    pub build: fn() -> Box<dyn Task>,
}

impl TaskFactory {
    pub const fn enabled(build: fn() -> Box<dyn Task>) -> Self {
        Self {
            enabled: true,
            build,
        }
    }

    pub const fn disabled(build: fn() -> Box<dyn Task>) -> Self {
        Self {
            enabled: false,
            build,
        }
    }
}

impl std::fmt::Debug for TaskFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskFactory")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Every task compiled into the sign, in presentation order.
///
/// New animations are added here; nothing is discovered at runtime.
pub static BUILTIN_TASKS: &[TaskFactory] = &[
    TaskFactory::enabled(tasks::rainbow_wave::RainbowWave::boxed),
    TaskFactory::enabled(tasks::color_sweep::ColorSweep::boxed),
    TaskFactory::enabled(tasks::percolate::Percolate::boxed),
    TaskFactory::enabled(tasks::memory_stress::MemoryStress::boxed),
    TaskFactory::disabled(tasks::coordinate_test::CoordinateTest::boxed),
];

/// Metadata reported for each registry entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TaskDescriptor {
    pub title: String,
    pub artist: String,
    pub enabled: bool,
    pub suggested_run_secs: f64,
}

struct Entry {
    enabled: bool,
    build: fn() -> Box<dyn Task>,
    info: TaskInfo,
}

/// Ordered set of known tasks, built once at startup and read-only afterwards.
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Registry over [`BUILTIN_TASKS`].
    pub fn builtin() -> Self {
        Self::from_factories(BUILTIN_TASKS)
    }

    /// Registry over an explicit table, order preserved.
    pub fn from_factories(factories: &[TaskFactory]) -> Self {
        let entries = factories
            .iter()
            .map(|f| Entry {
                enabled: f.enabled,
                build: f.build,
                info: (f.build)().info().clone(),
            })
            .collect();
        Self { entries }
    }

    /// Disable every entry whose title matches one of `titles` (case-insensitive).
    ///
    /// Used to apply configuration on top of the compiled-in flags; it never enables anything.
    pub fn disable_titles<S: AsRef<str>>(mut self, titles: &[S]) -> Self {
        for entry in &mut self.entries {
            if titles
                .iter()
                .any(|t| t.as_ref().eq_ignore_ascii_case(&entry.info.title))
            {
                entry.enabled = false;
            }
        }
        self
    }

    /// Fresh instances of every enabled task, in declaration order.
    #[tracing::instrument(skip(self))]
    pub fn list_enabled_tasks(&self) -> Vec<Box<dyn Task>> {
        let tasks: Vec<Box<dyn Task>> = self
            .entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| (e.build)())
            .collect();
        tracing::debug!(
            active = tasks.len(),
            declared = self.entries.len(),
            "listed enabled tasks"
        );
        tasks
    }

    /// Enabled tasks wrapped in lifecycle handles.
    pub fn active_handles(&self) -> Vec<TaskHandle> {
        self.list_enabled_tasks()
            .into_iter()
            .map(TaskHandle::new)
            .collect()
    }

    /// Metadata for every entry, disabled ones included.
    pub fn describe(&self) -> Vec<TaskDescriptor> {
        self.entries
            .iter()
            .map(|e| TaskDescriptor {
                title: e.info.title.clone(),
                artist: e.info.artist.clone(),
                enabled: e.enabled,
                suggested_run_secs: e.info.suggested_run_secs,
            })
            .collect()
    }

    /// Build the enabled task titled `title` (case-insensitive).
    pub fn find(&self, title: &str) -> Option<Box<dyn Task>> {
        self.entries
            .iter()
            .find(|e| e.enabled && e.info.title.eq_ignore_ascii_case(title))
            .map(|e| (e.build)())
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.info.title, e.enabled)))
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/task/registry.rs"]
mod tests;
