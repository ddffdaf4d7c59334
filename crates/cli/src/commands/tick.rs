//! tick command - Draw a tick progress line

use clap::Args;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

/// Draw the fill character `amount` times, redrawn in place
#[derive(Args, Debug)]
pub struct TickArgs {
    /// Number of fill characters
    pub amount: usize,

    /// Category label
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Execute the tick command
pub fn execute(args: TickArgs, output_config: &OutputConfig) -> ExitCode {
    super::with_reporter(output_config, |reporter| {
        reporter.progress_tick(args.amount, args.category.as_deref())
    })
}
