//! streamf-poll
//!
//! One-shot readiness diagnostic: `streamf-poll <device> <timeout-ms>`

use clap::Parser;
use std::process::ExitCode;
use streamf_cli::commands::poll::{self, PollArgs};
use streamf_cli::output;

fn main() -> ExitCode {
    let args = PollArgs::parse();
    streamf_cli::init_tracing(args.verbose);

    match poll::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
