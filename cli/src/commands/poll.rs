//! Readiness probe command implementation

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use streamf_device::{probe_device, Events, ProbeConfig, Readiness};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "streamf-poll")]
#[command(about = "Wait once for a streamf device to become readable or writable", long_about = None)]
#[command(version)]
pub struct PollArgs {
    /// Device node (e.g. /dev/streamf0)
    pub device: Option<PathBuf>,

    /// Maximum wait in milliseconds
    #[arg(allow_negative_numbers = true)]
    pub timeout: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Lines reported for the events that fired
pub fn report(events: Events) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if events.readable {
        lines.push("Device is now available for reading.");
    }
    if events.writable {
        lines.push("Device is now available for writing.");
    }
    if events.other {
        lines.push("Some other event occurred.");
    }
    lines
}

pub fn run(args: PollArgs) -> Result<()> {
    let (Some(device), Some(timeout), true) = (args.device, args.timeout, args.extra.is_empty())
    else {
        let program = crate::program_name("streamf-poll");
        println!("usage: {} device timeout", program);
        return Ok(());
    };

    let config = ProbeConfig::from_tokens(device, &timeout)?;
    info!("Probing {} for up to {}", config.device.display(), config.timeout);

    match probe_device(&config.device, config.timeout)? {
        Readiness::TimedOut => println!("poll timed out."),
        Readiness::Ready(events) => {
            for line in report(events) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
