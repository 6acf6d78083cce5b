use crate::foundation::core::{LCD_WIDTH, STATUS_LEN};

/// Two fixed-width lines for the 16x2 LCD.
///
/// Both lines are always exactly [`LCD_WIDTH`] characters (Unicode scalar values).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StatusText {
    pub line1: String,
    pub line2: String,
}

fn center(text: &str) -> String {
    format!("{text:^width$}", width = LCD_WIDTH)
}

fn fit(text: &str) -> String {
    let cut: String = text.chars().take(LCD_WIDTH).collect();
    format!("{cut:<width$}", width = LCD_WIDTH)
}

/// Format title and artist for the LCD.
///
/// Line 1 is the centered title. Line 2 is `"By: "` followed by the artist centered on its
/// own, and only then cut to width, so long or even moderately long artist names lose their
/// tail.
pub fn render_status(title: &str, artist: &str) -> StatusText {
    StatusText {
        line1: fit(&center(title)),
        line2: fit(&format!("By: {}", center(artist))),
    }
}

impl StatusText {
    /// 32 spaces.
    pub fn blank() -> Self {
        Self {
            line1: " ".repeat(LCD_WIDTH),
            line2: " ".repeat(LCD_WIDTH),
        }
    }

    /// Left-justify `message` across both lines, wrapping at the line boundary.
    pub fn message(message: &str) -> Self {
        let mut chars = message.chars();
        let first: String = chars.by_ref().take(LCD_WIDTH).collect();
        let second: String = chars.take(LCD_WIDTH).collect();
        Self {
            line1: fit(&first),
            line2: fit(&second),
        }
    }

    /// Both lines concatenated, [`STATUS_LEN`] characters.
    pub fn concat(&self) -> String {
        let mut out = String::with_capacity(STATUS_LEN);
        out.push_str(&self.line1);
        out.push_str(&self.line2);
        out
    }
}

impl std::fmt::Display for StatusText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.line1, self.line2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/task/status.rs"]
mod tests;
