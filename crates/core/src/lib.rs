//! rpt-core: Core library for reportline
//!
//! This crate provides the status-line reporting used by the `rpt` binary and
//! by any Rust program that wants the same output, including:
//! - Timestamped, color-coded status lines on stdout and stderr
//! - Self-overwriting progress ticks and percentage bars
//! - A null reporter that accepts the same calls and prints nothing
//!
//! ```no_run
//! use rpt_core::{ConsoleReporter, Message, Reporter, ReporterConfig};
//!
//! let mut reporter = ConsoleReporter::new(ReporterConfig::default(), Some(jiff::Timestamp::now()))?;
//! reporter.progress_fraction(3, 1, 10)?;
//! reporter.message(&Message::new("uploaded").category("DEPLOY").success())?;
//! # Ok::<(), rpt_core::Error>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod message;
pub mod reporter;
pub mod style;

pub use clock::{Clock, SystemClock, format_elapsed, parse_start};
pub use config::{ColorMode, ReporterConfig};
pub use error::{Error, Result};
pub use message::Message;
pub use reporter::{ConsoleReporter, LineState, NullReporter, Reporter, Stream};
pub use style::{Color, Outcome};
