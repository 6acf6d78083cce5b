use super::*;

fn widths(s: &StatusText) -> (usize, usize) {
    (s.line1.chars().count(), s.line2.chars().count())
}

#[test]
fn lines_are_always_lcd_width() {
    let long = "x".repeat(40);
    for (title, artist) in [
        ("", ""),
        ("Demo", "Mac Coleman"),
        (long.as_str(), long.as_str()),
        ("exactly sixteen!", "exactly sixteen!"),
        ("ünïcödé", "日本語のアーティスト"),
    ] {
        let s = render_status(title, artist);
        assert_eq!(widths(&s), (LCD_WIDTH, LCD_WIDTH), "{title:?} / {artist:?}");
        assert_eq!(s.concat().chars().count(), STATUS_LEN);
    }
}

#[test]
fn odd_padding_goes_to_the_trailing_side() {
    let s = render_status("RainbowWaveJava", "Luna");
    assert_eq!(s.line1, "RainbowWaveJava ");
    assert_eq!(render_status("Demo!", "").line1, "     Demo!      ");
}

#[test]
fn artist_is_centered_before_prefix_then_cropped() {
    let s = render_status("Rainbow Wave", "Mac Coleman");
    assert_eq!(s.line1, "  Rainbow Wave  ");
    assert_eq!(s.line2, "By:   Mac Colema");

    assert_eq!(render_status("", "Luna").line2, "By:       Luna  ");
}

#[test]
fn long_text_is_truncated_not_centered() {
    let s = render_status("A Very Long Title Indeed", "Someone With A Long Name");
    assert_eq!(s.line1, "A Very Long Titl");
    assert_eq!(s.line2, "By: Someone With");
}

#[test]
fn empty_inputs_pad_with_spaces() {
    let s = render_status("", "");
    assert_eq!(s.line1, " ".repeat(16));
    assert_eq!(s.line2, format!("By: {}", " ".repeat(12)));
}

#[test]
fn message_wraps_across_both_lines() {
    let s = StatusText::message("division by zero in frame 12");
    assert_eq!(s.line1, "division by zero");
    assert_eq!(s.line2, " in frame 12    ");
    assert_eq!(StatusText::blank().concat(), " ".repeat(32));
}
