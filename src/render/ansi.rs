//! ANSI color helpers for terminal output

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Gray,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Gray => 90,
        }
    }
}

/// Wrap text in a color escape (if the terminal supports it)
pub fn paint(text: &str, color: Color) -> String {
    if supports_color() {
        format!("\x1b[{}m{}\x1b[0m", color.code(), text)
    } else {
        text.to_string()
    }
}

fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
}

pub fn success(text: &str) -> String {
    paint(text, Color::Green)
}

pub fn error(text: &str) -> String {
    paint(text, Color::Red)
}

pub fn warning(text: &str) -> String {
    paint(text, Color::Yellow)
}

pub fn info(text: &str) -> String {
    paint(text, Color::Blue)
}

/// Remove ANSI escape sequences, leaving the visible characters.
///
/// Used wherever layout math needs the printed width of colored text.
pub fn strip(text: &str) -> String {
    let mut visible = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // Skip a CSI sequence through its final byte.
            for escaped in chars.by_ref() {
                if escaped.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            visible.push(ch);
        }
    }

    visible
}

/// Number of visible characters after stripping escapes
pub fn visible_width(text: &str) -> usize {
    strip(text).chars().count()
}
