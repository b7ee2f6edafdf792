//! Filter type definitions
//!
//! These types represent the text transformations the driver can stack on
//! either direction of the device. Word payloads are fixed-capacity byte
//! blocks so that they survive a trip through the driver unchanged.

use serde::{Serialize, Serializer};
use std::fmt;
use std::io;

/// Capacity of every word field in a descriptor, in bytes.
///
/// A word of exactly this length is stored without a terminating NUL.
pub const MAX_WORD_SIZE: usize = 20;

/// A bounded word as stored in a descriptor field
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word {
    bytes: [u8; MAX_WORD_SIZE],
    len: usize,
}

impl Word {
    /// Build a word from text, keeping at most [`MAX_WORD_SIZE`] bytes.
    pub fn new(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Copy bytes up to the first NUL, keeping at most [`MAX_WORD_SIZE`] of them.
    pub fn from_bytes(src: &[u8]) -> Self {
        let end = src.iter().position(|&b| b == 0).unwrap_or(src.len());
        let len = end.min(MAX_WORD_SIZE);

        let mut bytes = [0u8; MAX_WORD_SIZE];
        bytes[..len].copy_from_slice(&src[..len]);
        Self { bytes, len }
    }

    /// Read a fixed-width field. A field without NUL is taken whole.
    pub fn from_field(field: &[u8; MAX_WORD_SIZE]) -> Self {
        Self::from_bytes(field)
    }

    /// The field as it is laid out on the wire (zero padded).
    pub fn to_field(&self) -> [u8; MAX_WORD_SIZE] {
        self.bytes
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the field is full and therefore carries no terminator
    pub fn is_saturated(&self) -> bool {
        self.len == MAX_WORD_SIZE
    }
}

/// Lossy text form. A cut inside a multi-byte character shows as U+FFFD;
/// use [`Filter::write_to`] for the exact bytes.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Discriminant values shared with the driver
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Uppercase = 0,
    Lowercase = 1,
    Censor = 2,
    Substitute = 3,
    XorCipher = 4,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Uppercase,
        FilterKind::Lowercase,
        FilterKind::Censor,
        FilterKind::Substitute,
        FilterKind::XorCipher,
    ];

    pub fn tag(self) -> i32 {
        self as i32
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Label used when rendering a filter for the operator
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Uppercase => "UPPER",
            FilterKind::Lowercase => "LOWER",
            FilterKind::Censor => "CENSOR",
            FilterKind::Substitute => "SUBS",
            FilterKind::XorCipher => "XOR",
        }
    }
}

/// A single filter on one of the driver's stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Transform to upper case
    Uppercase,

    /// Transform to lower case
    Lowercase,

    /// Redact occurrences of `word`
    Censor { word: Word },

    /// Replace `from` with `to`
    Substitute { from: Word, to: Word },

    /// XOR-combine `from` with `cipher`
    XorCipher { from: Word, cipher: Word },
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Uppercase => FilterKind::Uppercase,
            Filter::Lowercase => FilterKind::Lowercase,
            Filter::Censor { .. } => FilterKind::Censor,
            Filter::Substitute { .. } => FilterKind::Substitute,
            Filter::XorCipher { .. } => FilterKind::XorCipher,
        }
    }

    /// Write the operator rendering with every word emitted byte for byte.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.kind().label().as_bytes())?;
        let fields: Vec<(&str, &Word)> = match self {
            Filter::Uppercase | Filter::Lowercase => vec![],
            Filter::Censor { word } => vec![("", word)],
            Filter::Substitute { from, to } => vec![("from:", from), ("to:", to)],
            Filter::XorCipher { from, cipher } => vec![("from:", from), ("cypher:", cipher)],
        };
        for (name, word) in fields {
            write!(out, " {}[", name)?;
            out.write_all(word.as_bytes())?;
            out.write_all(b"]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.kind().label();
        match self {
            Filter::Uppercase | Filter::Lowercase => f.write_str(label),
            Filter::Censor { word } => write!(f, "{} [{}]", label, word),
            Filter::Substitute { from, to } => write!(f, "{} from:[{}] to:[{}]", label, from, to),
            Filter::XorCipher { from, cipher } => {
                write!(f, "{} from:[{}] cypher:[{}]", label, from, cipher)
            }
        }
    }
}
