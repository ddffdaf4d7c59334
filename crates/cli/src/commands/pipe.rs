//! pipe command - Report lines read from stdin
//!
//! Every input line becomes a status line. Lines starting with `::` are
//! directives that drive progress output instead:
//!
//! ```text
//! ::tick 5 [CATEGORY]      five fill characters, redrawn in place
//! ::fraction 3 10 [UNIT]   bar for 3 of 10 units (unit size defaults to 1)
//! ::error TEXT             ERROR line on stdout
//! ::debug TEXT             DEBUG line
//! ::ok TEXT                success line
//! ::fail TEXT              failure line on stderr
//! ::done                   terminate an open progress line
//! ```

use std::io::BufRead;

use anyhow::{Context, bail};
use clap::Args;
use rpt_core::{Message, Reporter};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

const DIRECTIVE_PREFIX: &str = "::";

/// Report every line read from stdin
#[derive(Args, Debug)]
pub struct PipeArgs {
    /// Category label for plain lines
    #[arg(short, long)]
    pub category: Option<String>,
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    Message(&'a str),
    Tick {
        amount: usize,
        category: Option<&'a str>,
    },
    Fraction {
        completed: u64,
        total: u64,
        unit_size: u64,
    },
    Error(&'a str),
    Debug(&'a str),
    Ok(&'a str),
    Fail(&'a str),
    Done,
}

/// Parse a line; anything without the `::` prefix is a plain message
pub fn parse_directive(line: &str) -> anyhow::Result<Directive<'_>> {
    let Some(rest) = line.strip_prefix(DIRECTIVE_PREFIX) else {
        return Ok(Directive::Message(line));
    };

    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = args.trim();

    match name {
        "tick" => {
            let mut parts = args.split_whitespace();
            let amount = parts
                .next()
                .context("missing tick amount")?
                .parse()
                .context("invalid tick amount")?;
            let category = parts.next();
            if parts.next().is_some() {
                bail!("too many arguments for ::tick");
            }
            Ok(Directive::Tick { amount, category })
        }
        "fraction" => {
            let parts: Vec<&str> = args.split_whitespace().collect();
            let [completed, total, rest @ ..] = parts.as_slice() else {
                bail!("::fraction needs COMPLETED and TOTAL");
            };
            let unit_size = match rest {
                [] => 1,
                [unit] => unit.parse().context("invalid unit size")?,
                _ => bail!("too many arguments for ::fraction"),
            };
            Ok(Directive::Fraction {
                completed: completed.parse().context("invalid completed count")?,
                total: total.parse().context("invalid total")?,
                unit_size,
            })
        }
        "error" => Ok(Directive::Error(args)),
        "debug" => Ok(Directive::Debug(args)),
        "ok" => Ok(Directive::Ok(args)),
        "fail" => Ok(Directive::Fail(args)),
        "done" => Ok(Directive::Done),
        other => bail!("unknown directive '{DIRECTIVE_PREFIX}{other}'"),
    }
}

fn apply(
    reporter: &mut dyn Reporter,
    directive: Directive<'_>,
    category: Option<&str>,
) -> rpt_core::Result<()> {
    match directive {
        Directive::Message(text) => {
            let mut message = Message::new(text);
            if let Some(category) = category {
                message = message.category(category);
            }
            reporter.message(&message)
        }
        Directive::Tick {
            amount,
            category: tick_category,
        } => reporter.progress_tick(amount, tick_category.or(category)),
        Directive::Fraction {
            completed,
            total,
            unit_size,
        } => reporter.progress_fraction(completed, unit_size, total),
        Directive::Error(text) => reporter.error(text),
        Directive::Debug(text) => reporter.debug(text),
        Directive::Ok(text) => reporter.success(text),
        Directive::Fail(text) => reporter.failure(text),
        Directive::Done => reporter.finish_line(),
    }
}

/// Report all of `input`, returning how many lines were rejected
///
/// Rejected directives are reported as failures and processing continues.
pub fn run<R: BufRead>(
    input: R,
    reporter: &mut dyn Reporter,
    category: Option<&str>,
) -> anyhow::Result<usize> {
    let mut rejected = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        match parse_directive(line) {
            Ok(directive) => apply(reporter, directive, category)?,
            Err(e) => {
                rejected += 1;
                tracing::debug!(line = index + 1, error = %e, "rejected directive");
                reporter.failure(&format!("line {}: {e:#}", index + 1))?;
            }
        }
    }

    reporter.finish_line()?;
    Ok(rejected)
}

/// Execute the pipe command
pub fn execute(args: PipeArgs, output_config: &OutputConfig) -> ExitCode {
    let mut reporter = match output_config.reporter() {
        Ok(reporter) => reporter,
        Err(e) => {
            eprintln!("rpt: {e}");
            return ExitCode::from(&e);
        }
    };

    let stdin = std::io::stdin();
    match run(stdin.lock(), reporter.as_mut(), args.category.as_deref()) {
        Ok(0) => ExitCode::Success,
        Ok(rejected) => {
            tracing::debug!(rejected, "input contained invalid directives");
            ExitCode::UsageError
        }
        Err(e) => {
            eprintln!("rpt: {e:#}");
            e.downcast_ref::<rpt_core::Error>()
                .map(ExitCode::from)
                .unwrap_or(ExitCode::GeneralError)
        }
    }
}
