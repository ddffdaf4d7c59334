//! Wall-clock source and elapsed-time formatting

use jiff::{SignedDuration, Timestamp};

use crate::error::{Error, Result};

/// Width of the elapsed-time column, `HH:MM:SS`
pub const ELAPSED_WIDTH: usize = 8;

/// Source of the current instant
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Format a duration as zero-padded `HH:MM:SS`
///
/// Hours keep growing past 24. Negative durations (a start instant in the
/// future) render as `00:00:00`.
pub fn format_elapsed(elapsed: SignedDuration) -> String {
    let total = elapsed.as_secs().max(0);
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parse a start instant given as `now`, Unix seconds, or RFC 3339
pub fn parse_start(input: &str, clock: &dyn Clock) -> Result<Timestamp> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("now") {
        return Ok(clock.now());
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Timestamp::from_second(seconds)
            .map_err(|e| Error::InvalidTimestamp(format!("{input}: {e}")));
    }

    input
        .parse::<Timestamp>()
        .map_err(|e| Error::InvalidTimestamp(format!("{input}: {e}")))
}
