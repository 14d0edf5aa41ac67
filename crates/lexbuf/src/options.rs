/// Default size of the first buffer a [`Lexer`](crate::Lexer) allocates.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Configuration options for a [`Lexer`](crate::Lexer).
///
/// # Examples
///
/// ```rust
/// use lexbuf::{Lexer, LexerOptions};
///
/// let options = LexerOptions {
///     buffer_size: 64,
///     ..Default::default()
/// };
/// let lexer = Lexer::with_options(&b"abc"[..], options);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexerOptions {
    /// Estimated buffer size needed for one token plus its lookahead.
    ///
    /// This is only the starting capacity; the lexer grows geometrically when
    /// a token outgrows half of its buffer. A size of zero is treated as one.
    ///
    /// # Default
    ///
    /// `4096`
    pub buffer_size: usize,

    /// Whether to adopt the source's entire content up front when the source
    /// can hand it over (see [`Source::take_all`](crate::Source::take_all)).
    ///
    /// When adopted, the lexer never reads from the source again and starts
    /// in the exhausted state.
    ///
    /// # Default
    ///
    /// `true`
    pub adopt_source_bytes: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            adopt_source_bytes: true,
        }
    }
}
