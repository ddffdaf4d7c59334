//! Console and null reporters
//!
//! A [`ConsoleReporter`] writes one status line per message and redraws a
//! single progress line in place. It remembers whether the last write left a
//! line open so the next write can terminate it first.
//!
//! The reporter is `&mut self` throughout and holds no locks. Callers that
//! share one across threads must wrap it in a `Mutex`, otherwise partial lines
//! from different threads would interleave.

use std::fmt;
use std::io::Write;

use console::Term;
use jiff::{SignedDuration, Timestamp};

use crate::clock::{Clock, ELAPSED_WIDTH, SystemClock, format_elapsed};
use crate::config::ReporterConfig;
use crate::error::Result;
use crate::message::Message;
use crate::style::{self, Color, Outcome, RESET};

/// Width of the bracketed category label
pub const LABEL_WIDTH: usize = 10;

/// Operations shared by every reporter
pub trait Reporter {
    /// Write a status line
    fn message(&mut self, message: &Message<'_>) -> Result<()>;

    /// Redraw the progress line as `amount` fill characters
    fn progress_tick(&mut self, amount: usize, category: Option<&str>) -> Result<()>;

    /// Redraw the progress line as a bar with a percentage
    fn progress_fraction(
        &mut self,
        completed_units: u64,
        unit_size: u64,
        total_size: u64,
    ) -> Result<()>;

    /// Terminate an open line without writing anything else
    fn finish_line(&mut self) -> Result<()>;

    fn info(&mut self, text: &str) -> Result<()> {
        self.message(&Message::new(text))
    }

    fn debug(&mut self, text: &str) -> Result<()> {
        self.message(&Message::new(text).category(style::DEBUG))
    }

    /// Red `ERROR` line on stdout; use [`Reporter::failure`] for stderr
    fn error(&mut self, text: &str) -> Result<()> {
        self.message(&Message::new(text).category(style::ERROR))
    }

    fn success(&mut self, text: &str) -> Result<()> {
        self.message(&Message::new(text).success())
    }

    fn failure(&mut self, text: &str) -> Result<()> {
        self.message(&Message::new(text).failure())
    }

    /// Report a failure with the error and its sources as trailing detail
    fn error_chain(&mut self, text: &str, err: &dyn std::error::Error) -> Result<()> {
        let detail = describe_error(err);
        self.message(&Message::new(text).failure().detail(&detail))
    }
}

/// Output stream a line was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Whether the last write left a line open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// The cursor sits at the start of a fresh line
    Idle,
    /// A progress line was drawn and can be redrawn with `\r`
    ProgressPending {
        /// Visible width of the drawn line
        width: usize,
    },
    /// A message was written without its newline
    LinePending(Stream),
}

/// Reporter writing colored status lines to stdout and stderr
pub struct ConsoleReporter<O = Term, E = Term> {
    config: ReporterConfig,
    start: Option<Timestamp>,
    clock: Box<dyn Clock>,
    stdout: O,
    stderr: E,
    stdout_color: bool,
    stderr_color: bool,
    state: LineState,
}

impl ConsoleReporter<Term, Term> {
    /// Create a reporter on the process's stdout and stderr
    ///
    /// Without a `start` instant the elapsed column stays blank.
    pub fn new(config: ReporterConfig, start: Option<Timestamp>) -> Result<Self> {
        Self::with_streams(config, start, Term::stdout(), Term::stderr())
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    /// Create a reporter on arbitrary writers
    pub fn with_streams(
        config: ReporterConfig,
        start: Option<Timestamp>,
        stdout: O,
        stderr: E,
    ) -> Result<Self> {
        config.validate()?;

        let stdout_color = config.color.stdout_enabled();
        let stderr_color = config.color.stderr_enabled();
        tracing::debug!(
            category = %config.default_category,
            quiet = config.quiet,
            color = %config.color,
            timed = start.is_some(),
            "console reporter ready"
        );

        Ok(Self {
            config,
            start,
            clock: Box::new(SystemClock),
            stdout,
            stderr,
            stdout_color,
            stderr_color,
            state: LineState::Idle,
        })
    }

    /// Replace the wall-clock source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Treat the cursor as sitting at the end of an unterminated line
    ///
    /// For callers resuming output after another process left a progress or
    /// partial line open.
    pub fn assume_open_line(mut self, stream: Stream) -> Self {
        self.state = LineState::LinePending(stream);
        self
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Time since the start instant, if one was given
    pub fn elapsed(&self) -> Option<SignedDuration> {
        self.start
            .map(|start| self.clock.now().duration_since(start))
    }

    /// Consume the reporter and return its writers
    pub fn into_streams(self) -> (O, E) {
        (self.stdout, self.stderr)
    }

    fn writer(&mut self, stream: Stream) -> &mut dyn Write {
        match stream {
            Stream::Stdout => &mut self.stdout,
            Stream::Stderr => &mut self.stderr,
        }
    }

    fn colored(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => self.stdout_color,
            Stream::Stderr => self.stderr_color,
        }
    }

    fn close_pending(&mut self) -> Result<()> {
        let stream = match self.state {
            LineState::Idle => return Ok(()),
            LineState::ProgressPending { .. } => Stream::Stdout,
            LineState::LinePending(stream) => stream,
        };

        tracing::trace!(?stream, state = ?self.state, "terminating open line");
        let out = self.writer(stream);
        out.write_all(b"\n")?;
        out.flush()?;
        self.state = LineState::Idle;
        Ok(())
    }

    /// `[label] elapsed body` with colors applied when `colored`
    fn render(
        &self,
        label: &str,
        color: Color,
        body: &str,
        suppress_time: bool,
        colored: bool,
    ) -> String {
        let elapsed = match self.elapsed() {
            Some(elapsed) if !suppress_time => format_elapsed(elapsed),
            _ => String::new(),
        };

        if colored {
            format!(
                "{yellow}[{label:<LABEL_WIDTH$.LABEL_WIDTH$}]{grey} {elapsed:>ELAPSED_WIDTH$} {color}{body}{RESET}",
                yellow = Color::Yellow.code(),
                grey = Color::Grey.code(),
                color = color.code(),
            )
        } else {
            format!("[{label:<LABEL_WIDTH$.LABEL_WIDTH$}] {elapsed:>ELAPSED_WIDTH$} {body}")
        }
    }

    fn draw_progress(&mut self, category: Option<&str>, body: &str) -> Result<()> {
        if matches!(self.state, LineState::LinePending(_)) {
            self.close_pending()?;
        }

        let category = category.unwrap_or(&self.config.default_category);
        let style = style::resolve(category, Outcome::Unset);
        let mut line = self.render(style.label, style.color, body, false, self.stdout_color);

        let width = console::measure_text_width(&line);
        if let LineState::ProgressPending { width: previous } = self.state {
            line.push_str(&" ".repeat(previous.saturating_sub(width)));
        }

        let out = self.writer(Stream::Stdout);
        out.write_all(b"\r")?;
        out.write_all(line.as_bytes())?;
        out.flush()?;
        self.state = LineState::ProgressPending { width };
        Ok(())
    }
}

impl<O: Write, E: Write> Reporter for ConsoleReporter<O, E> {
    fn message(&mut self, message: &Message<'_>) -> Result<()> {
        if self.config.quiet {
            return Ok(());
        }

        self.close_pending()?;

        let stream = match message.outcome {
            Outcome::Failure => Stream::Stderr,
            _ => Stream::Stdout,
        };
        let category = message
            .category
            .unwrap_or(&self.config.default_category);
        let style = style::resolve(category, message.outcome);
        let mut line = self.render(
            style.label,
            style.color,
            message.text,
            message.suppress_time,
            self.colored(stream),
        );

        if let Some(detail) = message.detail {
            line.push('\n');
            line.push_str(detail);
        }
        if !message.no_newline {
            line.push('\n');
        }

        let out = self.writer(stream);
        out.write_all(line.as_bytes())?;
        out.flush()?;

        self.state = if message.no_newline {
            LineState::LinePending(stream)
        } else {
            LineState::Idle
        };
        Ok(())
    }

    fn progress_tick(&mut self, amount: usize, category: Option<&str>) -> Result<()> {
        if self.config.quiet {
            return Ok(());
        }

        let body = self.config.fill_char.to_string().repeat(amount);
        self.draw_progress(category, &body)
    }

    fn progress_fraction(
        &mut self,
        completed_units: u64,
        unit_size: u64,
        total_size: u64,
    ) -> Result<()> {
        if self.config.quiet {
            return Ok(());
        }

        let body = render_bar(
            completed_units,
            unit_size,
            total_size,
            self.config.bar_width,
            self.config.fill_char,
        );
        self.draw_progress(None, &body)
    }

    fn finish_line(&mut self) -> Result<()> {
        if self.config.quiet {
            return Ok(());
        }
        self.close_pending()
    }
}

impl<O, E> fmt::Debug for ConsoleReporter<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReporter")
            .field("config", &self.config)
            .field("start", &self.start)
            .field("stdout_color", &self.stdout_color)
            .field("stderr_color", &self.stderr_color)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn message(&mut self, _message: &Message<'_>) -> Result<()> {
        Ok(())
    }

    fn progress_tick(&mut self, _amount: usize, _category: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn progress_fraction(
        &mut self,
        _completed_units: u64,
        _unit_size: u64,
        _total_size: u64,
    ) -> Result<()> {
        Ok(())
    }

    fn finish_line(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Completed share of the work, clamped to `[0, 1]`; zero total counts as 0
pub fn fraction(completed_units: u64, unit_size: u64, total_size: u64) -> f64 {
    if total_size == 0 {
        return 0.0;
    }
    let done = completed_units as f64 * unit_size as f64;
    (done / total_size as f64).clamp(0.0, 1.0)
}

/// Filled cells for `width`, floored on the exact ratio; zero total fills nothing
pub fn filled_cells(
    completed_units: u64,
    unit_size: u64,
    total_size: u64,
    width: usize,
) -> usize {
    if total_size == 0 {
        return 0;
    }

    let done = u128::from(completed_units) * u128::from(unit_size);
    let total = u128::from(total_size);
    if done >= total {
        return width;
    }
    // done < total < 2^64, so the product stays within u128
    (done * width as u128 / total) as usize
}

/// `[####    ] 50.0%` for the completed share of the work
pub fn render_bar(
    completed_units: u64,
    unit_size: u64,
    total_size: u64,
    width: usize,
    fill: char,
) -> String {
    let filled = filled_cells(completed_units, unit_size, total_size, width);
    format!(
        "[{}{}] {:.1}%",
        fill.to_string().repeat(filled),
        " ".repeat(width - filled),
        fraction(completed_units, unit_size, total_size) * 100.0
    )
}

fn describe_error(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str("\n  caused by: ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::config::ColorMode;

    const T0: i64 = 1_700_000_000;

    type Captured = ConsoleReporter<Vec<u8>, Vec<u8>>;

    fn plain() -> ReporterConfig {
        ReporterConfig {
            color: ColorMode::Never,
            ..Default::default()
        }
    }

    /// Reporter started at T0 whose clock reads T0 + `offset` seconds
    fn timed(config: ReporterConfig, offset: i64) -> Captured {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(Timestamp::from_second(T0 + offset).unwrap());

        let start = Timestamp::from_second(T0).unwrap();
        ConsoleReporter::with_streams(config, Some(start), Vec::new(), Vec::new())
            .unwrap()
            .with_clock(clock)
    }

    fn untimed(config: ReporterConfig) -> Captured {
        ConsoleReporter::with_streams(config, None, Vec::new(), Vec::new()).unwrap()
    }

    fn output(reporter: Captured) -> (String, String) {
        let (out, err) = reporter.into_streams();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_plain_message() {
        let mut reporter = timed(plain(), 5);
        reporter.info("hello").unwrap();
        assert_eq!(reporter.state(), LineState::Idle);

        let (out, err) = output(reporter);
        insta::assert_snapshot!(out, @"[MESSAGE   ] 00:00:05 hello");
        assert!(out.ends_with('\n'));
        assert!(err.is_empty());
    }

    #[test]
    fn test_success_after_65_seconds() {
        let config = ReporterConfig {
            color: ColorMode::Always,
            ..Default::default()
        };
        let mut reporter = timed(config, 65);
        reporter.success("build ok").unwrap();

        let (out, err) = output(reporter);
        assert_eq!(
            out,
            "\x1b[93m[MESSAGE   ]\x1b[90m 00:01:05 \x1b[92mbuild ok\x1b[0m\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_category_colors() {
        let config = ReporterConfig {
            color: ColorMode::Always,
            ..Default::default()
        };
        let mut reporter = timed(config, 0);
        reporter.debug("d").unwrap();
        reporter.error("e").unwrap();

        let (out, _) = output(reporter);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("\x1b[93m[DEBUG     ]"));
        assert!(lines[0].ends_with("\x1b[90md\x1b[0m"));
        assert!(lines[1].starts_with("\x1b[93m[ERROR     ]"));
        assert!(lines[1].ends_with("\x1b[91me\x1b[0m"));
    }

    #[test]
    fn test_error_category_stays_on_stdout() {
        let mut reporter = timed(plain(), 0);
        reporter.error("not fatal").unwrap();

        let (out, err) = output(reporter);
        insta::assert_snapshot!(out, @"[ERROR     ] 00:00:00 not fatal");
        assert!(err.is_empty());
    }

    #[test]
    fn test_failure_goes_to_stderr_with_error_label() {
        let mut reporter = timed(plain(), 0);
        reporter
            .message(&Message::new("deploy failed").category("DEPLOY").failure())
            .unwrap();

        let (out, err) = output(reporter);
        assert!(out.is_empty());
        assert_eq!(err, "[ERROR     ] 00:00:00 deploy failed\n");
    }

    #[test]
    fn test_blank_elapsed_without_start() {
        let mut reporter = untimed(plain());
        reporter.info("hello").unwrap();
        assert_eq!(reporter.elapsed(), None);

        let (out, _) = output(reporter);
        assert_eq!(out, "[MESSAGE   ]          hello\n");
    }

    #[test]
    fn test_suppressed_time_keeps_columns() {
        let mut reporter = timed(plain(), 42);
        reporter.message(&Message::new("a").no_time()).unwrap();
        reporter.info("b").unwrap();

        let (out, _) = output(reporter);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[MESSAGE   ]          a");
        assert_eq!(lines[1], "[MESSAGE   ] 00:00:42 b");
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn test_label_is_always_ten_wide() {
        let mut reporter = timed(plain(), 0);
        for category in ["", "OK", "DEPLOY", "EXACTLY10C", "MUCHTOOLONGCATEGORY"] {
            reporter
                .message(&Message::new("x").category(category))
                .unwrap();
        }

        let (out, _) = output(reporter);
        for line in out.lines() {
            let close = line.find(']').unwrap();
            assert_eq!(close, 1 + LABEL_WIDTH, "line: {line:?}");
        }
        assert!(out.contains("[MUCHTOOLON]"));
        assert!(out.contains("[EXACTLY10C]"));
    }

    #[test]
    fn test_configured_default_category() {
        let config = ReporterConfig {
            default_category: "DEPLOY".to_string(),
            ..plain()
        };
        let mut reporter = untimed(config);
        reporter.info("rolling out").unwrap();
        reporter.progress_tick(2, None).unwrap();

        let (out, _) = output(reporter);
        assert!(out.starts_with("[DEPLOY    ]"));
        assert!(out.contains("\r[DEPLOY    ]"));
    }

    #[test]
    fn test_hours_past_a_day() {
        let mut reporter = timed(plain(), 30 * 3600 + 61);
        reporter.info("still going").unwrap();

        let (out, _) = output(reporter);
        insta::assert_snapshot!(out, @"[MESSAGE   ] 30:01:01 still going");
    }

    #[test]
    fn test_trailing_detail() {
        let mut reporter = timed(plain(), 0);
        reporter
            .message(&Message::new("oops").detail("line 1\nline 2"))
            .unwrap();

        let (out, _) = output(reporter);
        assert_eq!(out, "[MESSAGE   ] 00:00:00 oops\nline 1\nline 2\n");
    }

    #[test]
    fn test_detail_is_not_colored() {
        let config = ReporterConfig {
            color: ColorMode::Always,
            ..Default::default()
        };
        let mut reporter = timed(config, 0);
        reporter
            .message(&Message::new("oops").detail("trace"))
            .unwrap();

        let (out, _) = output(reporter);
        assert!(out.ends_with("oops\x1b[0m\ntrace\n"));
    }

    #[test]
    fn test_progress_tick() {
        let mut reporter = timed(plain(), 3);
        reporter.progress_tick(3, Some("UPLOAD")).unwrap();
        assert_eq!(reporter.state(), LineState::ProgressPending { width: 25 });

        let (out, _) = output(reporter);
        assert_eq!(out, "\r[UPLOAD    ] 00:00:03 ###");
    }

    #[test]
    fn test_progress_redraws_in_place() {
        let mut reporter = timed(plain(), 0);
        reporter.progress_tick(3, None).unwrap();
        reporter.progress_tick(5, None).unwrap();

        let (out, _) = output(reporter);
        assert_eq!(
            out,
            "\r[MESSAGE   ] 00:00:00 ###\r[MESSAGE   ] 00:00:00 #####"
        );
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_shorter_redraw_is_padded() {
        let mut reporter = timed(plain(), 0);
        reporter.progress_tick(5, None).unwrap();
        reporter.progress_tick(2, None).unwrap();

        let (out, _) = output(reporter);
        assert!(out.ends_with("\r[MESSAGE   ] 00:00:00 ##   "));
    }

    #[test]
    fn test_message_after_progress_breaks_line_once() {
        let mut reporter = timed(plain(), 0);
        reporter.progress_tick(4, None).unwrap();
        reporter.info("done").unwrap();

        let (out, _) = output(reporter);
        assert_eq!(
            out,
            "\r[MESSAGE   ] 00:00:00 ####\n[MESSAGE   ] 00:00:00 done\n"
        );
    }

    #[test]
    fn test_message_after_no_newline_breaks_line_once() {
        let mut reporter = timed(plain(), 0);
        reporter
            .message(&Message::new("checking...").no_newline())
            .unwrap();
        assert_eq!(reporter.state(), LineState::LinePending(Stream::Stdout));
        reporter.info("ok").unwrap();
        assert_eq!(reporter.state(), LineState::Idle);

        let (out, _) = output(reporter);
        assert_eq!(
            out,
            "[MESSAGE   ] 00:00:00 checking...\n[MESSAGE   ] 00:00:00 ok\n"
        );
    }

    #[test]
    fn test_pending_stderr_line_is_closed_on_stderr() {
        let mut reporter = timed(plain(), 0);
        reporter
            .message(&Message::new("failing").failure().no_newline())
            .unwrap();
        reporter.info("next").unwrap();

        let (out, err) = output(reporter);
        assert_eq!(err, "[ERROR     ] 00:00:00 failing\n");
        assert_eq!(out, "[MESSAGE   ] 00:00:00 next\n");
    }

    #[test]
    fn test_progress_after_no_newline_starts_fresh_line() {
        let mut reporter = timed(plain(), 0);
        reporter
            .message(&Message::new("fetching").no_newline())
            .unwrap();
        reporter.progress_tick(1, None).unwrap();

        let (out, _) = output(reporter);
        assert_eq!(
            out,
            "[MESSAGE   ] 00:00:00 fetching\n\r[MESSAGE   ] 00:00:00 #"
        );
    }

    #[test]
    fn test_finish_line() {
        let mut reporter = timed(plain(), 0);
        reporter.finish_line().unwrap();
        reporter.progress_tick(1, None).unwrap();
        reporter.finish_line().unwrap();
        assert_eq!(reporter.state(), LineState::Idle);
        reporter.finish_line().unwrap();

        let (out, _) = output(reporter);
        assert_eq!(out, "\r[MESSAGE   ] 00:00:00 #\n");
    }

    #[test]
    fn test_assume_open_line() {
        let mut reporter = timed(plain(), 0).assume_open_line(Stream::Stdout);
        reporter.info("resumed").unwrap();

        let (out, _) = output(reporter);
        assert_eq!(out, "\n[MESSAGE   ] 00:00:00 resumed\n");
    }

    #[test]
    fn test_state_transitions() {
        let mut reporter = timed(plain(), 0);
        assert_eq!(reporter.state(), LineState::Idle);

        reporter.progress_fraction(1, 1, 2).unwrap();
        assert!(matches!(reporter.state(), LineState::ProgressPending { .. }));

        reporter
            .message(&Message::new("partial").no_newline())
            .unwrap();
        assert_eq!(reporter.state(), LineState::LinePending(Stream::Stdout));

        reporter.progress_tick(2, None).unwrap();
        assert!(matches!(reporter.state(), LineState::ProgressPending { .. }));

        reporter.info("done").unwrap();
        assert_eq!(reporter.state(), LineState::Idle);
    }

    #[test]
    fn test_progress_fraction_quarter() {
        let mut reporter = timed(plain(), 0);
        reporter.progress_fraction(50, 1, 200).unwrap();

        let (out, _) = output(reporter);
        let expected = format!(
            "\r[MESSAGE   ] 00:00:00 [{}{}] 25.0%",
            "#".repeat(10),
            " ".repeat(30)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_progress_fraction_clamps_to_full() {
        let mut reporter = timed(plain(), 0);
        reporter.progress_fraction(300, 1, 200).unwrap();

        let (out, _) = output(reporter);
        assert!(out.ends_with(&format!("[{}] 100.0%", "#".repeat(40))));
    }

    #[test]
    fn test_progress_fraction_zero_total() {
        let mut reporter = timed(plain(), 0);
        reporter.progress_fraction(10, 1, 0).unwrap();

        let (out, _) = output(reporter);
        assert!(out.ends_with(&format!("[{}] 0.0%", " ".repeat(40))));
    }

    #[test]
    fn test_progress_fraction_custom_bar() {
        let config = ReporterConfig {
            bar_width: 10,
            fill_char: '=',
            ..plain()
        };
        let mut reporter = untimed(config);
        reporter.progress_fraction(3, 256, 1024).unwrap();

        let (out, _) = output(reporter);
        assert_eq!(out, "\r[MESSAGE   ]          [=======   ] 75.0%");
    }

    #[test]
    fn test_colored_progress_width_ignores_escapes() {
        let config = ReporterConfig {
            color: ColorMode::Always,
            ..Default::default()
        };
        let mut reporter = timed(config, 0);
        reporter.progress_tick(3, None).unwrap();
        assert_eq!(reporter.state(), LineState::ProgressPending { width: 25 });
    }

    #[test]
    fn test_quiet_writes_nothing() {
        let config = ReporterConfig {
            quiet: true,
            ..plain()
        };
        let mut reporter = timed(config, 0);
        reporter.info("a").unwrap();
        reporter.failure("b").unwrap();
        reporter.progress_tick(3, None).unwrap();
        reporter.progress_fraction(1, 1, 2).unwrap();
        reporter.finish_line().unwrap();
        assert_eq!(reporter.state(), LineState::Idle);

        let (out, err) = output(reporter);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_error_chain_detail() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("upload aborted")
            }
        }

        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::other("connection reset"));
        let mut reporter = timed(plain(), 0);
        reporter.error_chain("transfer failed", &err).unwrap();

        let (out, err) = output(reporter);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "[ERROR     ] 00:00:00 transfer failed\nupload aborted\n  caused by: connection reset\n"
        );
    }

    #[test]
    fn test_elapsed() {
        let reporter = timed(plain(), 65);
        assert_eq!(reporter.elapsed(), Some(SignedDuration::from_secs(65)));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ReporterConfig {
            bar_width: 0,
            ..plain()
        };
        let result = ConsoleReporter::with_streams(config, None, Vec::new(), Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_null_reporter_is_silent() {
        let mut reporter = NullReporter;
        let dyn_reporter: &mut dyn Reporter = &mut reporter;
        dyn_reporter.info("a").unwrap();
        dyn_reporter.failure("b").unwrap();
        dyn_reporter.progress_tick(10, Some("X")).unwrap();
        dyn_reporter.progress_fraction(1, 1, 0).unwrap();
        dyn_reporter
            .error_chain("c", &std::io::Error::other("d"))
            .unwrap();
        dyn_reporter.finish_line().unwrap();
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(1, 1, 2, 4, '#'), "[##  ] 50.0%");
        assert_eq!(render_bar(9, 1, 4, 4, '#'), "[####] 100.0%");
        assert_eq!(render_bar(0, 1, 5, 2, '#'), "[  ] 0.0%");
        assert_eq!(render_bar(3, 1, 0, 2, '#'), "[  ] 0.0%");
    }

    #[test]
    fn test_bar_fill_matches_exact_ratio() {
        // 0.29 * 100 is 28.999... in floating point
        let bar = render_bar(29, 1, 100, 100, '#');
        assert_eq!(bar.matches('#').count(), 29);
        assert!(bar.ends_with("] 29.0%"));

        for (completed, total) in [(57, 100), (58, 100), (29, 50), (87, 150)] {
            assert_eq!(
                filled_cells(completed, 1, total, 100),
                (completed * 100 / total) as usize,
                "{completed}/{total}"
            );
        }
    }

    #[test]
    fn test_filled_cells_without_overflow() {
        assert_eq!(filled_cells(u64::MAX, u64::MAX, u64::MAX, 40), 40);
        assert_eq!(filled_cells(1, u64::MAX, u64::MAX, 40), 40);
        assert_eq!(filled_cells(1, 1, u64::MAX, 40), 0);
    }

    #[test]
    fn test_progress_fraction_integer_boundary() {
        let config = ReporterConfig {
            bar_width: 100,
            ..plain()
        };
        let mut reporter = untimed(config);
        reporter.progress_fraction(29, 1, 100).unwrap();

        let (out, _) = output(reporter);
        let expected = format!(
            "\r[MESSAGE   ]          [{}{}] 29.0%",
            "#".repeat(29),
            " ".repeat(71)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_fraction() {
        assert_eq!(fraction(50, 1, 200), 0.25);
        assert_eq!(fraction(2, 100, 100), 1.0);
        assert_eq!(fraction(0, 1, 10), 0.0);
        assert_eq!(fraction(5, 1, 0), 0.0);
    }
}
