//! Error types for token parsing and descriptor decoding

use thiserror::Error;

/// Errors raised while turning command tokens into a request.
///
/// All of these are detected before the device is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("too few/many words ({0}) in filter specifier, expected between 1 and 3")]
    BadArity(usize),

    #[error("unknown length-{arity} filter specifier `{token}`, try {expected}")]
    UnknownSpecifier {
        token: String,
        arity: usize,
        expected: &'static str,
    },

    #[error("unknown direction `{0}`, try r or w")]
    UnknownDirection(String),

    #[error("unknown operation `{0}`, try push, pop or reset")]
    UnknownOperation(String),
}

/// Errors raised while decoding a descriptor filled in by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unexpected filter type {0} in descriptor")]
    UnknownFilterType(i32),
}
