//! ioctl request codes and the requests that carry them.
//!
//! The six codes below are the driver's published table. The push and pop
//! codes encode `sizeof(long)` as their argument size, exactly as the driver
//! header declares them, even though the buffer passed is a [`RawFilter`].

use crate::error::SpecError;
use crate::protocol::wire::RawFilter;
use crate::types::filter::Filter;
use nix::sys::ioctl::ioctl_num_type;
use std::fmt;
use std::str::FromStr;

/// ioctl type byte reserved by the driver
pub const STREAMF_IOC_MAGIC: u8 = b's';

/// Highest request number the driver accepts
pub const STREAMF_IOC_MAXNR: u8 = 6;

const ARG_SIZE: usize = std::mem::size_of::<libc::c_long>();

pub const STREAMF_IOCRESETR: ioctl_num_type = nix::request_code_none!(STREAMF_IOC_MAGIC, 1);
pub const STREAMF_IOCRESETW: ioctl_num_type = nix::request_code_none!(STREAMF_IOC_MAGIC, 2);
pub const STREAMF_IOCSPUSHW: ioctl_num_type = nix::request_code_write!(STREAMF_IOC_MAGIC, 3, ARG_SIZE);
pub const STREAMF_IOCSPUSHR: ioctl_num_type = nix::request_code_read!(STREAMF_IOC_MAGIC, 4, ARG_SIZE);
pub const STREAMF_IOCGPOPW: ioctl_num_type = nix::request_code_write!(STREAMF_IOC_MAGIC, 5, ARG_SIZE);
pub const STREAMF_IOCGPOPR: ioctl_num_type = nix::request_code_read!(STREAMF_IOC_MAGIC, 6, ARG_SIZE);

/// Which of the driver's two filter stacks is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Read, Direction::Write];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Read => "read",
            Direction::Write => "write",
        }
    }
}

impl FromStr for Direction {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Direction::Read),
            "w" => Ok(Direction::Write),
            _ => Err(SpecError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stack operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Push,
    Pop,
    Reset,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Push, Operation::Pop, Operation::Reset];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Push => "push",
            Operation::Pop => "pop",
            Operation::Reset => "reset",
        }
    }
}

impl FromStr for Operation {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(Operation::Push),
            "pop" => Ok(Operation::Pop),
            "reset" => Ok(Operation::Reset),
            _ => Err(SpecError::UnknownOperation(s.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque ioctl request number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestCode(ioctl_num_type);

impl RequestCode {
    /// Resolve the driver's code for a (direction, operation) pair.
    pub fn resolve(direction: Direction, operation: Operation) -> Self {
        let code = match (direction, operation) {
            (Direction::Read, Operation::Push) => STREAMF_IOCSPUSHR,
            (Direction::Write, Operation::Push) => STREAMF_IOCSPUSHW,
            (Direction::Read, Operation::Pop) => STREAMF_IOCGPOPR,
            (Direction::Write, Operation::Pop) => STREAMF_IOCGPOPW,
            (Direction::Read, Operation::Reset) => STREAMF_IOCRESETR,
            (Direction::Write, Operation::Reset) => STREAMF_IOCRESETW,
        };
        Self(code)
    }

    pub fn raw(self) -> ioctl_num_type {
        self.0
    }

    /// Request number within the driver's magic (the `nr` field)
    pub fn number(self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One request against the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    Push { direction: Direction, filter: Filter },
    Pop { direction: Direction },
    Reset { direction: Direction },
}

impl ControlRequest {
    pub fn direction(&self) -> Direction {
        match *self {
            ControlRequest::Push { direction, .. }
            | ControlRequest::Pop { direction }
            | ControlRequest::Reset { direction } => direction,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ControlRequest::Push { .. } => Operation::Push,
            ControlRequest::Pop { .. } => Operation::Pop,
            ControlRequest::Reset { .. } => Operation::Reset,
        }
    }

    pub fn code(&self) -> RequestCode {
        RequestCode::resolve(self.direction(), self.operation())
    }

    /// Buffer handed to the driver: the encoded filter for push, zeroes otherwise.
    pub fn descriptor(&self) -> RawFilter {
        match self {
            ControlRequest::Push { filter, .. } => RawFilter::from(filter),
            ControlRequest::Pop { .. } | ControlRequest::Reset { .. } => RawFilter::zeroed(),
        }
    }
}
