//! Device session
//!
//! A session owns the open device for exactly one request. [`DeviceSession::submit`]
//! consumes the session, so the device is closed before the outcome (or the
//! rejection) reaches the caller.

use crate::control::DeviceControl;
use crate::error::DeviceError;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use streamf_shared::{ControlRequest, Filter};
use tracing::{debug, info};

/// Result of a request the driver accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pushed,
    Popped(Filter),
    Reset,
}

/// An open device, good for a single request
pub struct DeviceSession<D = File> {
    path: PathBuf,
    device: D,
}

impl DeviceSession<File> {
    /// Open the device read/write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| DeviceError::DeviceUnavailable {
                path: path.clone(),
                source,
            })?;

        debug!("Opened device {}", path.display());
        Ok(Self { path, device })
    }
}

impl<D: DeviceControl> DeviceSession<D> {
    /// Wrap an already open device.
    pub fn with_device(path: impl Into<PathBuf>, device: D) -> Self {
        Self {
            path: path.into(),
            device,
        }
    }

    /// Issue one request and release the device.
    pub fn submit(self, request: &ControlRequest) -> Result<Outcome, DeviceError> {
        let Self { path, mut device } = self;
        let code = request.code();
        let mut descriptor = request.descriptor();

        debug!(
            "Issuing {} on the {} stack of {} (code {})",
            request.operation(),
            request.direction(),
            path.display(),
            code
        );
        let result = device.control(code, &mut descriptor);

        drop(device);
        debug!("Closed device {}", path.display());

        result.map_err(|source| DeviceError::RequestRejected {
            operation: request.operation(),
            code,
            source,
        })?;

        let outcome = match request {
            ControlRequest::Push { .. } => Outcome::Pushed,
            ControlRequest::Pop { .. } => Outcome::Popped(Filter::try_from(&descriptor)?),
            ControlRequest::Reset { .. } => Outcome::Reset,
        };
        info!(
            "{} on the {} stack accepted",
            request.operation(),
            request.direction()
        );
        Ok(outcome)
    }
}
