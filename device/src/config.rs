//! Configuration types for the command-line tools
//!
//! Both tools take their whole configuration from positional arguments.
//! These types hold the validated form so that nothing is opened before
//! every token has been checked.

use crate::error::ProbeError;
use crate::probe::ProbeTimeout;
use std::path::PathBuf;
use streamf_shared::{parse_filter, ControlRequest, Direction, Operation, SpecError};
use tracing::warn;

/// Configuration for one filter-stack request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    /// Device node to open
    pub device: PathBuf,

    /// Request to issue once the device is open
    pub request: ControlRequest,
}

impl ControlConfig {
    /// Build a configuration from raw tokens.
    ///
    /// Filter tokens are raw bytes and are only parsed for push; for pop and
    /// reset they are ignored.
    pub fn from_tokens<S: AsRef<[u8]>>(
        device: impl Into<PathBuf>,
        direction: &str,
        operation: &str,
        filter: &[S],
    ) -> Result<Self, SpecError> {
        let direction: Direction = direction.parse()?;
        let operation: Operation = operation.parse()?;

        let request = match operation {
            Operation::Push => ControlRequest::Push {
                direction,
                filter: parse_filter(filter)?,
            },
            Operation::Pop => ControlRequest::Pop { direction },
            Operation::Reset => ControlRequest::Reset { direction },
        };

        if operation != Operation::Push && !filter.is_empty() {
            warn!(
                "Ignoring {} filter token(s) for {}",
                filter.len(),
                operation
            );
        }

        Ok(Self {
            device: device.into(),
            request,
        })
    }
}

/// Configuration for one readiness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Device node to open
    pub device: PathBuf,

    /// Wait bound
    pub timeout: ProbeTimeout,
}

impl ProbeConfig {
    pub fn from_tokens(device: impl Into<PathBuf>, timeout: &str) -> Result<Self, ProbeError> {
        Ok(Self {
            device: device.into(),
            timeout: timeout.parse()?,
        })
    }
}
