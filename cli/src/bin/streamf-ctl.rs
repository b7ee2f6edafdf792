//! streamf-ctl
//!
//! Pushes, pops or resets a filter on the read or write stack of a streamf
//! device: `streamf-ctl <device> <r|w> <push|pop|reset> [filter tokens...]`

use clap::Parser;
use std::process::ExitCode;
use streamf_cli::commands::ctl::{self, CtlArgs};
use streamf_cli::output;

fn main() -> ExitCode {
    let args = CtlArgs::parse();
    streamf_cli::init_tracing(args.verbose);

    match ctl::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
