//! CLI command definitions and execution
//!
//! One-shot commands (`message`, `tick`, `fraction`) print a single line and
//! exit. `pipe` keeps one reporter alive for a whole stream of lines, so open
//! progress lines are terminated correctly between updates.

use clap::{Parser, Subcommand};
use rpt_core::{ColorMode, Reporter, SystemClock};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod completions;
mod fraction;
mod message;
pub mod pipe;
mod tick;

/// rpt - timestamped status lines for scripts
///
/// Prints `[CATEGORY  ] HH:MM:SS message` lines and in-place progress
/// indicators for long-running automation.
#[derive(Parser, Debug)]
#[command(name = "rpt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Start instant for the elapsed column: `now`, Unix seconds or RFC 3339
    #[arg(long, global = true, env = "RPT_START")]
    pub start: Option<String>,

    /// Label for messages without a category
    #[arg(long, global = true, env = "RPT_CATEGORY")]
    pub default_category: Option<String>,

    /// Color mode: auto, always or never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress all output
    #[arg(short, long, global = true, env = "RPT_QUIET")]
    pub quiet: bool,

    /// Width of the fraction bar
    #[arg(long, global = true, env = "RPT_BAR_WIDTH")]
    pub bar_width: Option<usize>,

    /// Character used for ticks and the filled part of the bar
    #[arg(long, global = true, env = "RPT_FILL")]
    pub fill: Option<char>,

    /// A previous rpt call left its line open; terminate it first
    #[arg(long, global = true, default_value = "false")]
    pub open_line: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a status line
    Message(message::MessageArgs),

    /// Draw a tick progress line (fill character repeated N times)
    Tick(tick::TickArgs),

    /// Draw a percentage bar
    Fraction(fraction::FractionArgs),

    /// Report every line read from stdin, honoring `::` directives
    Pipe(pipe::PipeArgs),

    /// Terminate a line left open by an earlier call
    Finish,

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Cli {
    /// Resolve the global flags into an output configuration
    pub fn output_config(&self) -> rpt_core::Result<OutputConfig> {
        let start = self
            .start
            .as_deref()
            .map(|s| rpt_core::parse_start(s, &SystemClock))
            .transpose()?;

        let color = if self.no_color {
            ColorMode::Never
        } else {
            self.color
        };

        Ok(OutputConfig {
            start,
            default_category: self.default_category.clone(),
            color,
            quiet: self.quiet,
            bar_width: self.bar_width,
            fill_char: self.fill,
            open_line: self.open_line,
        })
    }
}

/// Execute the CLI command and return an exit code
pub fn execute(cli: Cli) -> ExitCode {
    let output_config = match cli.output_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rpt: {e}");
            return ExitCode::from(&e);
        }
    };

    match cli.command {
        Commands::Message(args) => message::execute(args, &output_config),
        Commands::Tick(args) => tick::execute(args, &output_config),
        Commands::Fraction(args) => fraction::execute(args, &output_config),
        Commands::Pipe(args) => pipe::execute(args, &output_config),
        Commands::Finish => {
            let config = OutputConfig {
                open_line: true,
                ..output_config
            };
            with_reporter(&config, |reporter| reporter.finish_line())
        }
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Build the reporter, run `f` against it and map the outcome to an exit code
fn with_reporter<F>(config: &OutputConfig, f: F) -> ExitCode
where
    F: FnOnce(&mut dyn Reporter) -> rpt_core::Result<()>,
{
    let mut reporter = match config.reporter() {
        Ok(reporter) => reporter,
        Err(e) => {
            eprintln!("rpt: {e}");
            return ExitCode::from(&e);
        }
    };

    match f(reporter.as_mut()) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            tracing::debug!(error = %e, "write failed");
            eprintln!("rpt: {e}");
            ExitCode::from(&e)
        }
    }
}
