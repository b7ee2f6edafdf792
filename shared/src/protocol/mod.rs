//! Wire protocol definitions
//!
//! This module defines the binary descriptor and the ioctl request codes
//! used to talk to the streamf driver. Both must match the driver header
//! bit for bit.

pub mod request;
pub mod wire;
