use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SignError::lifecycle("x")
            .to_string()
            .contains("lifecycle error:")
    );
    assert!(
        SignError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert_eq!(
        SignError::task_fault("Rainbow Wave", "boom").to_string(),
        "task fault in 'Rainbow Wave': boom"
    );
    assert_eq!(
        SignError::FrameLength {
            expected: 3072,
            actual: 1
        }
        .to_string(),
        "frame length error: expected 3072 bytes, got 1"
    );
}

#[test]
fn lcd_message_drops_task_prefix() {
    assert_eq!(SignError::task_fault("t", "boom").lcd_message(), "boom");
    assert_eq!(
        SignError::lifecycle("x").lcd_message(),
        "lifecycle error: x"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SignError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
