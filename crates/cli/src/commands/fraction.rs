//! fraction command - Draw a percentage bar

use clap::Args;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

/// Draw `[####    ] 50.0%` for completed work, redrawn in place
#[derive(Args, Debug)]
pub struct FractionArgs {
    /// Completed units
    pub completed: u64,

    /// Total size; 0 renders as 0%
    pub total: u64,

    /// Size of one unit, e.g. a chunk size in bytes
    #[arg(short, long, default_value = "1")]
    pub unit_size: u64,
}

/// Execute the fraction command
pub fn execute(args: FractionArgs, output_config: &OutputConfig) -> ExitCode {
    super::with_reporter(output_config, |reporter| {
        reporter.progress_fraction(args.completed, args.unit_size, args.total)
    })
}
