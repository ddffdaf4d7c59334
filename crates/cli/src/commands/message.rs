//! message command - Print a status line

use clap::Args;
use rpt_core::{Message, Outcome};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

/// Print a status line
#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Message text
    pub text: String,

    /// Category label; ERROR and DEBUG get their own colors
    #[arg(short, long)]
    pub category: Option<String>,

    /// Leave the elapsed column blank
    #[arg(long)]
    pub no_time: bool,

    /// Mark the message as a success (green)
    #[arg(long, conflicts_with = "failure")]
    pub success: bool,

    /// Mark the message as a failure (ERROR label, written to stderr)
    #[arg(long)]
    pub failure: bool,

    /// Extra text printed on the following line, e.g. a stack trace
    #[arg(long)]
    pub detail: Option<String>,

    /// Do not terminate the line
    #[arg(short = 'n', long)]
    pub no_newline: bool,
}

impl MessageArgs {
    fn outcome(&self) -> Outcome {
        if self.failure {
            Outcome::Failure
        } else if self.success {
            Outcome::Success
        } else {
            Outcome::Unset
        }
    }

    fn to_message(&self) -> Message<'_> {
        let mut message = Message::new(&self.text).outcome(self.outcome());
        if let Some(category) = &self.category {
            message = message.category(category);
        }
        if let Some(detail) = &self.detail {
            message = message.detail(detail);
        }
        if self.no_time {
            message = message.no_time();
        }
        if self.no_newline {
            message = message.no_newline();
        }
        message
    }
}

/// Execute the message command
pub fn execute(args: MessageArgs, output_config: &OutputConfig) -> ExitCode {
    super::with_reporter(output_config, |reporter| {
        reporter.message(&args.to_message())
    })
}
