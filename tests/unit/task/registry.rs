use super::*;
use crate::canvas::buffer::Canvas;
use crate::foundation::error::SignResult;

struct Named(TaskInfo);

impl Task for Named {
    fn info(&self) -> &TaskInfo {
        &self.0
    }

    fn draw_frame(&mut self, _canvas: &mut Canvas, _delta_secs: f64) -> SignResult<bool> {
        Ok(true)
    }
}

fn a() -> Box<dyn Task> {
    Box::new(Named(TaskInfo::new("A", "x")))
}

fn b() -> Box<dyn Task> {
    Box::new(Named(TaskInfo::new("B", "y")))
}

fn c() -> Box<dyn Task> {
    Box::new(Named(TaskInfo::new("C", "z")))
}

fn titles(tasks: &[Box<dyn Task>]) -> Vec<String> {
    tasks.iter().map(|t| t.info().title.clone()).collect()
}

#[test]
fn disabled_entries_are_filtered_and_order_is_kept() {
    let reg = Registry::from_factories(&[
        TaskFactory::disabled(a),
        TaskFactory::enabled(b),
        TaskFactory::enabled(c),
    ]);
    assert_eq!(titles(&reg.list_enabled_tasks()), vec!["B", "C"]);
    assert_eq!(reg.len(), 3);
}

#[test]
fn listing_is_deterministic_and_builds_fresh_instances() {
    let reg = Registry::from_factories(&[TaskFactory::enabled(c), TaskFactory::enabled(a)]);
    let first = reg.list_enabled_tasks();
    let second = reg.list_enabled_tasks();
    assert_eq!(titles(&first), vec!["C", "A"]);
    assert_eq!(titles(&first), titles(&second));
}

#[test]
fn describe_reports_every_entry() {
    let reg = Registry::from_factories(&[TaskFactory::disabled(a), TaskFactory::enabled(b)]);
    let d = reg.describe();
    assert_eq!(d.len(), 2);
    assert_eq!(d[0].title, "A");
    assert!(!d[0].enabled);
    assert!(d[1].enabled);
    assert_eq!(d[1].artist, "y");
}

#[test]
fn disable_titles_only_turns_entries_off() {
    let reg = Registry::from_factories(&[
        TaskFactory::disabled(a),
        TaskFactory::enabled(b),
        TaskFactory::enabled(c),
    ])
    .disable_titles(&["b", "nope"]);
    assert_eq!(titles(&reg.list_enabled_tasks()), vec!["C"]);
}

#[test]
fn find_ignores_disabled_entries() {
    let reg = Registry::from_factories(&[TaskFactory::disabled(a), TaskFactory::enabled(b)]);
    assert!(reg.find("a").is_none());
    assert_eq!(reg.find("B").unwrap().info().title, "B");
}

#[test]
fn builtin_table_hides_the_coordinate_test() {
    let reg = Registry::builtin();
    let listed = titles(&reg.list_enabled_tasks());
    assert_eq!(
        listed,
        vec!["Rainbow Wave", "Demo", "Percolate", "Memory Stress"]
    );
    assert!(reg.describe().iter().any(|d| d.title == "CoordTest" && !d.enabled));
}

#[test]
fn active_handles_start_created() {
    let handles = Registry::builtin().active_handles();
    assert_eq!(handles.len(), 4);
    assert!(
        handles
            .iter()
            .all(|h| h.state() == crate::task::handle::LifecycleState::Created)
    );
}
