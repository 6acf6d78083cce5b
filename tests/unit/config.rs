use super::*;

#[test]
fn empty_object_uses_defaults() {
    let cfg = SignConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, SignConfig::default());
    assert_eq!(cfg.fps, 24);
    assert!((cfg.frame_delta_secs() - 1.0 / 24.0).abs() < 1e-12);
}

#[test]
fn parses_all_fields() {
    let cfg = SignConfig::from_json_str(
        r#"{
            "fps": 30,
            "default_run_secs": 12.5,
            "run_secs": { "Percolate": 60 },
            "disabled": ["Memory Stress"]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.default_run_secs, Some(12.5));
    assert_eq!(cfg.run_secs.get("Percolate"), Some(&60.0));
    assert_eq!(cfg.disabled, vec!["Memory Stress"]);
}

#[test]
fn run_secs_resolution_order() {
    let info = TaskInfo::new("Percolate", "Luna").with_run_secs(30.0);
    let mut cfg = SignConfig::default();
    assert_eq!(cfg.run_secs_for(&info), 30.0);

    cfg.default_run_secs = Some(5.0);
    assert_eq!(cfg.run_secs_for(&info), 5.0);

    cfg.run_secs.insert("percolate".to_owned(), 90.0);
    assert_eq!(cfg.run_secs_for(&info), 90.0);
}

#[test]
fn rejects_bad_values() {
    for text in [
        r#"{"fps": 0}"#,
        r#"{"fps": 1000}"#,
        r#"{"default_run_secs": -1}"#,
        r#"{"run_secs": {"Demo": 0}}"#,
        r#"{"unknown": true}"#,
        "not json",
    ] {
        let err = SignConfig::from_json_str(text).unwrap_err();
        assert!(matches!(err, SignError::Config(_)), "{text}: {err}");
    }
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = SignConfig::from_path("target/definitely/missing.json").unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}
