//! Command implementations shared by the streamf binaries
//!
//! - `streamf-ctl`: push, pop or reset a filter on one of the device stacks
//! - `streamf-poll`: one-shot readiness check on the device

pub mod commands;
pub mod output;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name the program was invoked as, for usage text. Falls back to `default`
/// when argv is empty.
pub fn program_name(default: &str) -> String {
    std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| default.to_string())
}

/// Initialize tracing/logging. Logs go to stderr so stdout stays clean.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
