//! Filter control command implementation

use crate::output;
use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use streamf_device::{ControlConfig, DeviceSession, Outcome};
use streamf_shared::{ControlRequest, MAX_WORD_SIZE};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "streamf-ctl")]
#[command(about = "Push, pop or reset filters on a streamf device", long_about = None)]
#[command(version)]
pub struct CtlArgs {
    /// Device node (e.g. /dev/streamf0)
    pub device: Option<PathBuf>,

    /// Stack to address: r (read) or w (write)
    pub direction: Option<String>,

    /// Operation: push, pop or reset
    pub operation: Option<String>,

    /// Filter specifier, required for push (do not quote it)
    #[arg(trailing_var_arg = true)]
    pub filter: Vec<OsString>,

    /// Print a popped filter as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Usage text printed when the request is incomplete
pub fn usage(program: &str) -> String {
    format!(
        "usage: {program} device r|w push|pop|reset [filter_specifier]\n\
         \x20   filter_specifier is necessary for pushing, as follows:\n\
         \x20   1. upper\n\
         \x20   2. lower\n\
         \x20   3. censor word\n\
         \x20   4. subs word repl\n\
         \x20   5. xor word cipher\n\
         \n\
         \x20   word, repl and cipher will be truncated to {max} bytes if too long.\n\
         \x20   Be warned that the filter won't contain a null byte if using the full {max}!\n\
         \x20   cipher does not support binary values since it's passed as an argument.\n\
         \x20   Do not quote the filter specifier.\n\
         \n\
         example call: {program} /dev/streamf2 w push subs hello bye\n",
        program = program,
        max = MAX_WORD_SIZE,
    )
}

/// Filter tokens exactly as they appeared in argv
pub fn filter_bytes(tokens: &[OsString]) -> Vec<&[u8]> {
    tokens.iter().map(|token| token.as_os_str().as_bytes()).collect()
}

pub fn run(args: CtlArgs) -> Result<()> {
    let (Some(device), Some(direction), Some(operation)) =
        (args.device, args.direction, args.operation)
    else {
        let program = crate::program_name("streamf-ctl");
        print!("{}", usage(&program));
        return Ok(());
    };

    // Every token is checked before the device is opened
    let filter = filter_bytes(&args.filter);
    let config = ControlConfig::from_tokens(device, &direction, &operation, &filter)
        .context("Invalid request")?;
    info!("Request: {:?}", config);

    let session = DeviceSession::open(&config.device)?;
    let outcome = session.submit(&config.request)?;

    match (outcome, config.request) {
        (Outcome::Popped(filter), _) => {
            if args.json {
                let json = serde_json::to_string(&filter).context("Failed to render filter")?;
                println!("{}", json);
            } else {
                let mut stdout = io::stdout().lock();
                stdout.write_all(b"Popped filter ")?;
                filter.write_to(&mut stdout)?;
                stdout.write_all(b"\n")?;
            }
        }
        (Outcome::Pushed, ControlRequest::Push { direction, filter }) => {
            output::success(&format!("Pushed {} onto the {} stack", filter, direction));
        }
        (_, request) => {
            output::success(&format!(
                "{} done on the {} stack",
                request.operation(),
                request.direction()
            ));
        }
    }

    Ok(())
}
