//! Filter data model

pub mod filter;
