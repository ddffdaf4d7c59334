//! Color palette and label selection
//!
//! Colors are a fixed table of escape codes resolved at render time. The
//! reporter decides per stream whether the codes are emitted at all.

/// Category that renders in red
pub const ERROR: &str = "ERROR";

/// Category that renders in grey
pub const DEBUG: &str = "DEBUG";

/// Terminal colors used by the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Cyan,
    Magenta,
    Blue,
    Yellow,
    Green,
    Red,
    Grey,
}

/// Escape sequence returning the terminal to plain text
pub const RESET: &str = "\x1b[0m";

impl Color {
    /// Bright-variant SGR escape sequence for this color
    pub const fn code(self) -> &'static str {
        match self {
            Color::White => "\x1b[97m",
            Color::Cyan => "\x1b[96m",
            Color::Magenta => "\x1b[95m",
            Color::Blue => "\x1b[94m",
            Color::Yellow => "\x1b[93m",
            Color::Green => "\x1b[92m",
            Color::Red => "\x1b[91m",
            Color::Grey => "\x1b[90m",
        }
    }
}

/// Tri-state outcome attached to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Styling follows the category
    #[default]
    Unset,
    /// Body turns green, label unchanged
    Success,
    /// Label forced to `ERROR`, body red, written to stderr
    Failure,
}

/// Resolved label and body color for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStyle<'a> {
    pub label: &'a str,
    pub color: Color,
}

/// Pick label and color from a category and an outcome
///
/// `Failure` always wins over the category.
pub fn resolve<'a>(category: &'a str, outcome: Outcome) -> LineStyle<'a> {
    let mut style = match category {
        ERROR => LineStyle {
            label: ERROR,
            color: Color::Red,
        },
        DEBUG => LineStyle {
            label: DEBUG,
            color: Color::Grey,
        },
        other => LineStyle {
            label: other,
            color: Color::White,
        },
    };

    match outcome {
        Outcome::Unset => {}
        Outcome::Success => style.color = Color::Green,
        Outcome::Failure => {
            style.label = ERROR;
            style.color = Color::Red;
        }
    }

    style
}
