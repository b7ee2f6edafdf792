//! Fixed-width filter descriptor exchanged with the driver.
//!
//! The driver declares the descriptor as a C struct holding an `enum` tag
//! followed by a union of word arrays:
//!
//! ```text
//! struct filter_struct {
//!     enum FilterType type;            // 4 bytes
//!     union {
//!         struct { char from[20]; char to[20]; }     subs;
//!         struct { char from[20]; char cipher[20]; } xor;
//!         char censor[20];
//!     };
//! };
//! ```
//!
//! Every variant places its first word at offset 4 and its second word at
//! offset 24, so the union is modelled here as two word slots. Word fields
//! are not NUL terminated when full.

use crate::error::ProtocolError;
use crate::types::filter::{Filter, FilterKind, Word, MAX_WORD_SIZE};
use tracing::trace;

/// Number of word slots in the payload union
pub const WORD_SLOTS: usize = 2;

/// Descriptor as laid out in driver memory
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFilter {
    /// `enum FilterType` discriminant
    pub kind: libc::c_int,

    /// Payload union, sized to the largest variant
    pub words: [[u8; MAX_WORD_SIZE]; WORD_SLOTS],
}

const _: () = assert!(
    std::mem::size_of::<RawFilter>()
        == std::mem::size_of::<libc::c_int>() + WORD_SLOTS * MAX_WORD_SIZE
);

impl RawFilter {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// An all-zero descriptor, handed to the driver for pop and reset.
    pub fn zeroed() -> Self {
        Self {
            kind: 0,
            words: [[0; MAX_WORD_SIZE]; WORD_SLOTS],
        }
    }

    /// Encode a filter. Payload slots the variant does not use stay zeroed.
    pub fn encode(filter: &Filter) -> Self {
        let mut raw = Self::zeroed();
        raw.kind = filter.kind().tag();
        match filter {
            Filter::Uppercase | Filter::Lowercase => {}
            Filter::Censor { word } => {
                raw.words[0] = word.to_field();
            }
            Filter::Substitute { from, to } => {
                raw.words[0] = from.to_field();
                raw.words[1] = to.to_field();
            }
            Filter::XorCipher { from, cipher } => {
                raw.words[0] = from.to_field();
                raw.words[1] = cipher.to_field();
            }
        }
        trace!("encoded {} into {}-byte descriptor", filter, Self::SIZE);
        raw
    }

    /// Decode a descriptor, reading only the slots of the tagged variant.
    pub fn decode(&self) -> Result<Filter, ProtocolError> {
        let kind = FilterKind::from_tag(self.kind)
            .ok_or(ProtocolError::UnknownFilterType(self.kind))?;
        let first = || Word::from_field(&self.words[0]);
        let second = || Word::from_field(&self.words[1]);

        Ok(match kind {
            FilterKind::Uppercase => Filter::Uppercase,
            FilterKind::Lowercase => Filter::Lowercase,
            FilterKind::Censor => Filter::Censor { word: first() },
            FilterKind::Substitute => Filter::Substitute {
                from: first(),
                to: second(),
            },
            FilterKind::XorCipher => Filter::XorCipher {
                from: first(),
                cipher: second(),
            },
        })
    }
}

impl Default for RawFilter {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<&Filter> for RawFilter {
    fn from(filter: &Filter) -> Self {
        Self::encode(filter)
    }
}

impl TryFrom<&RawFilter> for Filter {
    type Error = ProtocolError;

    fn try_from(raw: &RawFilter) -> Result<Self, Self::Error> {
        raw.decode()
    }
}
