//! Reporter configuration
//!
//! Settings are plain values supplied by the caller. Nothing here reads
//! files; the `rpt` binary fills the struct from flags and environment.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Label used when a message carries no category
pub const DEFAULT_CATEGORY: &str = "MESSAGE";

/// Default width of the bar drawn by `progress_fraction`
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Default glyph repeated to show progress
pub const DEFAULT_FILL_CHAR: char = '#';

/// When to emit color escape codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color when the target stream is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorMode {
    /// Resolve the mode for stdout
    pub fn stdout_enabled(self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Resolve the mode for stderr
    pub fn stderr_enabled(self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled_stderr(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(Error::InvalidConfig(format!(
                "color must be one of auto, always, never (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        };
        f.write_str(s)
    }
}

/// Settings for a [`ConsoleReporter`](crate::ConsoleReporter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Label for messages without a category, e.g. `MESSAGE` or `DEPLOY`
    pub default_category: String,

    /// Suppress all output
    pub quiet: bool,

    /// Color mode applied to both streams
    pub color: ColorMode,

    /// Number of cells inside the fraction bar
    pub bar_width: usize,

    /// Glyph used for ticks and the filled part of the bar
    pub fill_char: char,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            quiet: false,
            color: ColorMode::Auto,
            bar_width: DEFAULT_BAR_WIDTH,
            fill_char: DEFAULT_FILL_CHAR,
        }
    }
}

impl ReporterConfig {
    /// Check that the settings can produce well-formed lines
    pub fn validate(&self) -> Result<()> {
        if self.default_category.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "default category must not be empty".into(),
            ));
        }

        if self.bar_width == 0 {
            return Err(Error::InvalidConfig(
                "bar width must be at least 1".into(),
            ));
        }

        if self.fill_char.is_control() {
            return Err(Error::InvalidConfig(format!(
                "fill character must be printable (got {:?})",
                self.fill_char
            )));
        }

        Ok(())
    }
}
