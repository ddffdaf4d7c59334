//! Reporter construction
//!
//! Turns the global CLI flags into a reporter. Quiet runs get a
//! [`NullReporter`] so commands never check the flag themselves.

use jiff::Timestamp;
use rpt_core::{ColorMode, ConsoleReporter, NullReporter, Reporter, ReporterConfig, Stream};

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Instant the elapsed column counts from
    pub start: Option<Timestamp>,
    /// Label for messages without a category
    pub default_category: Option<String>,
    /// Color mode for both streams
    pub color: ColorMode,
    /// Suppress all output
    pub quiet: bool,
    /// Width of the fraction bar
    pub bar_width: Option<usize>,
    /// Glyph for ticks and bars
    pub fill_char: Option<char>,
    /// An earlier invocation left its line open on stdout
    pub open_line: bool,
}

impl OutputConfig {
    /// Reporter settings with unset flags left at their defaults
    pub fn reporter_config(&self) -> ReporterConfig {
        let defaults = ReporterConfig::default();
        ReporterConfig {
            default_category: self
                .default_category
                .clone()
                .unwrap_or(defaults.default_category),
            quiet: self.quiet,
            color: self.color,
            bar_width: self.bar_width.unwrap_or(defaults.bar_width),
            fill_char: self.fill_char.unwrap_or(defaults.fill_char),
        }
    }

    /// Build the reporter commands write through
    pub fn reporter(&self) -> rpt_core::Result<Box<dyn Reporter>> {
        let config = self.reporter_config();
        config.validate()?;

        if config.quiet {
            tracing::debug!("quiet mode, discarding output");
            return Ok(Box::new(NullReporter));
        }

        let mut reporter = ConsoleReporter::new(config, self.start)?;
        if self.open_line {
            reporter = reporter.assume_open_line(Stream::Stdout);
        }
        Ok(Box::new(reporter))
    }
}
