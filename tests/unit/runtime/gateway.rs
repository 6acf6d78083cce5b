use super::*;
use crate::foundation::core::{FRAME_LEN, STATUS_LEN};

#[test]
fn active_tasks_follow_declaration_order() {
    let gw = Gateway::builtin();
    let titles: Vec<String> = gw
        .get_active_tasks()
        .iter()
        .map(|h| h.title().to_owned())
        .collect();
    assert_eq!(titles, vec!["Rainbow Wave", "Demo", "Percolate", "Memory Stress"]);
}

#[test]
fn config_can_disable_more_tasks() {
    let cfg = SignConfig {
        disabled: vec!["memory stress".to_owned(), "Demo".to_owned()],
        ..SignConfig::default()
    };
    let gw = Gateway::with_config(&cfg);
    let titles: Vec<String> = gw
        .get_active_tasks()
        .iter()
        .map(|h| h.title().to_owned())
        .collect();
    assert_eq!(titles, vec!["Rainbow Wave", "Percolate"]);
    assert_eq!(gw.describe_tasks().len(), 5);
}

#[test]
fn handles_expose_the_boundary_surface() {
    let gw = Gateway::builtin();
    let mut h = gw.task("rainbow wave").unwrap();
    assert_eq!(h.artist(), "Mac Coleman");
    assert!(h.prepare());
    assert!(h.draw(1.0 / 24.0).unwrap());
    assert_eq!(h.retrieve_frame().len(), FRAME_LEN);
    assert_eq!(h.status_text().chars().count(), STATUS_LEN);
    h.teardown(false);
}

#[test]
fn disabled_tasks_cannot_be_looked_up() {
    assert!(Gateway::builtin().task("CoordTest").is_none());
}

#[test]
fn scheduler_starts_with_first_active_task() {
    let mut s = Gateway::builtin().scheduler(SignConfig::default());
    let tick = s.tick(0.04);
    assert_eq!(tick.task.as_deref(), Some("Rainbow Wave"));
    assert_eq!(tick.status.line1, "  Rainbow Wave  ");
}
