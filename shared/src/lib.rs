//! Shared types and protocol definitions for streamf
//!
//! This crate contains the filter data model, the fixed-width descriptor
//! exchanged with the driver, the ioctl request code table and the parser
//! that turns command tokens into filters.

pub mod error;
pub mod protocol;
pub mod spec;
pub mod types;

// Re-export commonly used types
pub use error::{ProtocolError, SpecError};
pub use protocol::request::{ControlRequest, Direction, Operation, RequestCode};
pub use protocol::wire::RawFilter;
pub use spec::parse_filter;
pub use types::filter::{Filter, FilterKind, Word, MAX_WORD_SIZE};
