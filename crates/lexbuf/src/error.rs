use thiserror::Error;

/// Terminal condition reported by a [`Source`](crate::Source).
///
/// Once recorded by a [`Lexer`](crate::Lexer) the error is sticky: no further
/// bytes are requested from the source, but everything already buffered stays
/// readable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LexerError {
    /// The source has no more bytes.
    #[error("end of stream")]
    Eof,
    /// The underlying reader failed.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A custom source failed.
    #[error("source error: {0}")]
    Source(&'static str),
}

impl LexerError {
    /// Whether this is the ordinary end of the stream rather than a failure.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, LexerError::Eof)
    }
}

impl PartialEq for LexerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LexerError::Eof, LexerError::Eof) => true,
            #[cfg(feature = "std")]
            (LexerError::Io(a), LexerError::Io(b)) => a.kind() == b.kind(),
            (LexerError::Source(a), LexerError::Source(b)) => a == b,
            _ => false,
        }
    }
}
