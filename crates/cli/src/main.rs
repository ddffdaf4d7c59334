//! rpt - timestamped status lines for automation scripts
//!
//! Prints color-coded `[CATEGORY] HH:MM:SS message` lines and in-place
//! progress indicators on behalf of shell scripts.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use reportline::commands::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never interleave with report lines
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli);

    std::process::exit(exit_code.as_i32());
}
