//! streamf device library
//!
//! This library owns every interaction with the device node: opening it,
//! issuing a single filter-stack request, and probing readiness with one
//! bounded wait.

pub mod config;
pub mod control;
pub mod error;
pub mod probe;
pub mod session;

pub use config::{ControlConfig, ProbeConfig};
pub use control::DeviceControl;
pub use error::{DeviceError, ProbeError};
pub use probe::{probe, probe_device, Events, ProbeTimeout, Readiness};
pub use session::{DeviceSession, Outcome};
