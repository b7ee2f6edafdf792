//! Device and probe error types

use std::io;
use std::path::PathBuf;
use streamf_shared::{Operation, ProtocolError, RequestCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to open device {}", .path.display())]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The driver refused the request. For push the stack may be full, for
    /// pop it may be empty.
    #[error("{operation} request {code} failed, filter stack may be full or empty")]
    RequestRejected {
        operation: Operation,
        code: RequestCode,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to open device {}", .path.display())]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid timeout `{0}`, expected a non-negative number of milliseconds")]
    InvalidTimeout(String),

    #[error("poll call failed")]
    WaitFailed(#[source] io::Error),
}
