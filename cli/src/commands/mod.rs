//! Command implementations

pub mod ctl;
pub mod poll;
