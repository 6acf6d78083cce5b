use super::*;
use crate::canvas::buffer::Canvas;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{SignError, SignResult};
use crate::task::base::{Task, TaskInfo};
use crate::task::handle::LifecycleState;

enum Script {
    /// Draws `n` frames, then reports it may be retired.
    Finite(u32),
    Forever,
    Decline,
    /// Faults on the given (1-based) frame.
    FaultOn(u32),
}

struct Scripted {
    info: TaskInfo,
    script: Script,
    frames: u32,
    shade: u8,
}

fn handle(title: &str, shade: u8, script: Script) -> TaskHandle {
    TaskHandle::new(Box::new(Scripted {
        info: TaskInfo::new(title, "Tester").with_run_secs(1.0),
        script,
        frames: 0,
        shade,
    }))
}

impl Task for Scripted {
    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn prepare(&mut self) -> SignResult<bool> {
        self.frames = 0;
        Ok(!matches!(self.script, Script::Decline))
    }

    fn draw_frame(&mut self, canvas: &mut Canvas, _delta_secs: f64) -> SignResult<bool> {
        self.frames += 1;
        if let Script::FaultOn(n) = self.script {
            if self.frames == n {
                return Err(SignError::task_fault(&self.info.title, "kaboom"));
            }
        }
        canvas.fill(Rgb8::new(self.shade, 0, 0));
        Ok(match self.script {
            Script::Finite(n) => self.frames < n,
            _ => true,
        })
    }
}

fn titles(ticks: &[Tick]) -> Vec<Option<String>> {
    ticks.iter().map(|t| t.task.clone()).collect()
}

fn run(s: &mut Scheduler, n: usize, delta: f64) -> Vec<Tick> {
    (0..n).map(|_| s.tick(delta)).collect()
}

#[test]
fn rotates_when_a_task_says_it_is_done() {
    let mut s = Scheduler::new(
        vec![handle("A", 1, Script::Finite(2)), handle("B", 2, Script::Finite(1))],
        SignConfig::default(),
    );
    let ticks = run(&mut s, 5, 0.01);
    let got: Vec<Option<&str>> = ticks.iter().map(|t| t.task.as_deref()).collect();
    assert_eq!(got, vec![Some("A"), Some("A"), Some("B"), Some("A"), Some("A")]);
    assert_eq!(ticks[2].frame.pixel(0, 0), Some(Rgb8::new(2, 0, 0)));
    assert!(ticks[1].events.contains(&SchedulerEvent::Retired {
        task: "A".to_owned(),
        forced: false
    }));
    assert_eq!(ticks.last().unwrap().index, 4);
}

#[test]
fn rotates_when_run_time_is_used_up() {
    let mut s = Scheduler::new(
        vec![handle("A", 1, Script::Forever), handle("B", 2, Script::Forever)],
        SignConfig::default(),
    );
    // run_secs is 1.0 per task
    let ticks = run(&mut s, 4, 0.5);
    assert_eq!(
        titles(&ticks),
        vec![
            Some("A".to_owned()),
            Some("A".to_owned()),
            Some("B".to_owned()),
            Some("B".to_owned())
        ]
    );
}

#[test]
fn config_overrides_run_time() {
    let mut cfg = SignConfig::default();
    cfg.run_secs.insert("a".to_owned(), 0.25);
    let mut s = Scheduler::new(
        vec![handle("A", 1, Script::Forever), handle("B", 2, Script::Forever)],
        cfg,
    );
    let ticks = run(&mut s, 2, 0.5);
    assert_eq!(ticks[1].task.as_deref(), Some("B"));
}

#[test]
fn declining_tasks_are_skipped() {
    let mut s = Scheduler::new(
        vec![handle("A", 1, Script::Decline), handle("B", 2, Script::Forever)],
        SignConfig::default(),
    );
    let t = s.tick(0.1);
    assert_eq!(t.task.as_deref(), Some("B"));
    assert_eq!(
        t.events,
        vec![
            SchedulerEvent::Skipped {
                task: "A".to_owned()
            },
            SchedulerEvent::Started {
                task: "B".to_owned()
            }
        ]
    );
}

#[test]
fn nothing_runnable_yields_blank_output() {
    let mut s = Scheduler::new(vec![handle("A", 1, Script::Decline)], SignConfig::default());
    let t = s.tick(0.1);
    assert!(t.task.is_none());
    assert_eq!(t.frame, Frame::blank());
    assert_eq!(t.status, StatusText::blank());

    let mut empty = Scheduler::new(Vec::new(), SignConfig::default());
    assert!(empty.tick(0.1).task.is_none());
}

#[test]
fn a_fault_is_isolated_behind_the_error_screen() {
    let mut s = Scheduler::new(
        vec![handle("A", 1, Script::FaultOn(2)), handle("B", 2, Script::Forever)],
        SignConfig::default(),
    );
    let first = s.tick(0.1);
    assert_eq!(first.task.as_deref(), Some("A"));

    let faulted = s.tick(0.1);
    assert_eq!(faulted.task.as_deref(), Some("Error :("));
    assert!(faulted.events.contains(&SchedulerEvent::Faulted {
        task: "A".to_owned(),
        message: "kaboom".to_owned()
    }));
    assert!(faulted.status.line1.starts_with("kaboom"));
    assert_eq!(s.handles()[0].state(), LifecycleState::TornDown);

    // the error screen runs for its own run time, then the rotation resumes with B
    let mut after = s.tick(5.0);
    assert_eq!(after.task.as_deref(), Some("Error :("));
    after = s.tick(5.0);
    assert_eq!(after.task.as_deref(), Some("Error :("));
    after = s.tick(0.1);
    assert_eq!(after.task.as_deref(), Some("B"));
}

#[test]
fn shutdown_forces_teardown_of_the_current_task() {
    let mut s = Scheduler::new(vec![handle("A", 1, Script::Forever)], SignConfig::default());
    s.tick(0.1);
    assert_eq!(s.current_title(), Some("A"));
    let events = s.shutdown();
    assert_eq!(
        events,
        vec![SchedulerEvent::Retired {
            task: "A".to_owned(),
            forced: true
        }]
    );
    assert_eq!(s.handles()[0].state(), LifecycleState::TornDown);
    assert!(s.shutdown().is_empty());
}
