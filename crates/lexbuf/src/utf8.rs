//! Best-effort UTF-8 decoding.
//!
//! No validation is done: a stray continuation byte decodes as itself with
//! length one, and a truncated or overlong sequence still yields a value.
//! Tokenizers that care about well-formedness check [`Rune::as_char`].

/// One decoded codepoint and its byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rune {
    /// Decoded value. Not guaranteed to be a Unicode scalar value.
    pub value: u32,
    /// Number of bytes the encoding occupies (1-4).
    pub len: usize,
}

impl Rune {
    /// The value as a `char`, if it is a Unicode scalar value.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.value)
    }
}

/// Sequence length implied by a leading byte.
#[must_use]
pub fn sequence_len(first: u8) -> usize {
    match first {
        0x00..=0xBF => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

/// Decode one codepoint, fetching byte `i` of the sequence with `byte(i)`.
///
/// Only as many bytes as the leading byte announces are requested.
pub fn decode(mut byte: impl FnMut(usize) -> u8) -> Rune {
    let first = byte(0);
    let len = sequence_len(first);
    let cont = |b: u8| u32::from(b & 0x3F);
    let value = match len {
        1 => u32::from(first),
        2 => (u32::from(first & 0x1F) << 6) | cont(byte(1)),
        3 => (u32::from(first & 0x0F) << 12) | (cont(byte(1)) << 6) | cont(byte(2)),
        _ => {
            (u32::from(first & 0x07) << 18)
                | (cont(byte(1)) << 12)
                | (cont(byte(2)) << 6)
                | cont(byte(3))
        }
    };
    Rune { value, len }
}
