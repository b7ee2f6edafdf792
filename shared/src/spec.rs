//! Filter specifier parsing
//!
//! A specifier is one to three tokens taken straight from the command line.
//! Dispatch happens on the number of tokens first and on the first token
//! second:
//!
//! | tokens | forms                                      |
//! |--------|--------------------------------------------|
//! | 1      | `upper`, `lower`                           |
//! | 2      | `censor WORD`                              |
//! | 3      | `subs FROM TO`, `xor FROM CIPHER`          |
//!
//! Tokens are taken as raw bytes, so words need not be valid UTF-8. Words
//! longer than [`MAX_WORD_SIZE`] bytes are cut to fit.

use crate::error::SpecError;
use crate::types::filter::{Filter, Word, MAX_WORD_SIZE};
use tracing::debug;

/// Parse a filter specifier.
pub fn parse_filter<S: AsRef<[u8]>>(tokens: &[S]) -> Result<Filter, SpecError> {
    let tokens: Vec<&[u8]> = tokens.iter().map(AsRef::as_ref).collect();

    match tokens.as_slice() {
        [b"upper"] => Ok(Filter::Uppercase),
        [b"lower"] => Ok(Filter::Lowercase),
        [other] => Err(unknown(other, 1, "upper or lower")),

        [b"censor", word] => Ok(Filter::Censor { word: word_of(word) }),
        [other, _] => Err(unknown(other, 2, "censor")),

        [b"subs", from, to] => Ok(Filter::Substitute {
            from: word_of(from),
            to: word_of(to),
        }),
        [b"xor", from, cipher] => Ok(Filter::XorCipher {
            from: word_of(from),
            cipher: word_of(cipher),
        }),
        [other, _, _] => Err(unknown(other, 3, "subs or xor")),

        _ => Err(SpecError::BadArity(tokens.len())),
    }
}

fn unknown(token: &[u8], arity: usize, expected: &'static str) -> SpecError {
    SpecError::UnknownSpecifier {
        token: String::from_utf8_lossy(token).into_owned(),
        arity,
        expected,
    }
}

fn word_of(raw: &[u8]) -> Word {
    let word = Word::from_bytes(raw);
    if word.len() < raw.len() {
        debug!(
            "word {:?} truncated to {} bytes: {:?}",
            String::from_utf8_lossy(raw),
            MAX_WORD_SIZE,
            word
        );
    }
    word
}
