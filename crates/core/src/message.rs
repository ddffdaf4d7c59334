//! Message builder
//!
//! Carries the optional arguments of a status line so call sites only spell
//! out what differs from the defaults.

use crate::style::Outcome;

/// A status line waiting to be reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message<'a> {
    pub text: &'a str,
    pub category: Option<&'a str>,
    pub suppress_time: bool,
    pub outcome: Outcome,
    pub detail: Option<&'a str>,
    pub no_newline: bool,
}

impl<'a> Message<'a> {
    /// Create a message with the default category
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    /// Set the category label, e.g. `ERROR`, `DEBUG` or `DEPLOY`
    pub fn category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    /// Render a blank elapsed-time column
    pub fn no_time(mut self) -> Self {
        self.suppress_time = true;
        self
    }

    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn success(self) -> Self {
        self.outcome(Outcome::Success)
    }

    pub fn failure(self) -> Self {
        self.outcome(Outcome::Failure)
    }

    /// Append raw text on its own line, e.g. a backtrace
    pub fn detail(mut self, detail: &'a str) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Leave the line open; the next write terminates it
    pub fn no_newline(mut self) -> Self {
        self.no_newline = true;
        self
    }
}
