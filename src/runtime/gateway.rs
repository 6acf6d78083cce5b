use crate::config::SignConfig;
use crate::runtime::scheduler::Scheduler;
use crate::task::handle::TaskHandle;
use crate::task::registry::{Registry, TaskDescriptor};

/// Entry point for an external orchestrator.
///
/// The orchestrator asks for the active tasks once, then drives each handle as
/// `prepare`, `draw`*, `teardown`, reading `retrieve_frame` and `status_text` after each draw.
#[derive(Debug)]
pub struct Gateway {
    registry: Registry,
}

impl Gateway {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Gateway over the compiled-in tasks.
    pub fn builtin() -> Self {
        Self::new(Registry::builtin())
    }

    /// Gateway over the compiled-in tasks with `cfg.disabled` applied.
    pub fn with_config(cfg: &SignConfig) -> Self {
        Self::new(Registry::builtin().disable_titles(&cfg.disabled))
    }

    /// One handle per enabled task, in declaration order.
    #[tracing::instrument(skip(self))]
    pub fn get_active_tasks(&self) -> Vec<TaskHandle> {
        let handles = self.registry.active_handles();
        for h in &handles {
            tracing::info!(task = %h.info(), "task available");
        }
        handles
    }

    /// Metadata for every declared task.
    pub fn describe_tasks(&self) -> Vec<TaskDescriptor> {
        self.registry.describe()
    }

    /// Handle for a single enabled task, looked up by title.
    pub fn task(&self, title: &str) -> Option<TaskHandle> {
        self.registry.find(title).map(TaskHandle::new)
    }

    /// Scheduler rotating through the active tasks.
    pub fn scheduler(&self, cfg: SignConfig) -> Scheduler {
        Scheduler::new(self.get_active_tasks(), cfg)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/gateway.rs"]
mod tests;
