//! A streaming cursor for hand-written tokenizers.
//!
//! [`Lexer`] sits between an incremental byte [`Source`] and tokenizer code.
//! It offers lookahead ([`Lexer::peek`]), backtracking ([`Lexer::mark`] /
//! [`Lexer::rewind`]) and explicit commits ([`Lexer::shift`] /
//! [`Lexer::skip`]) over bytes that have not been fully consumed yet. When a
//! lookahead runs past the buffered data, the lexer exchanges its buffer for
//! a larger or recycled one from its [`BufferPool`], carrying the unfinished
//! token forward.
//!
//! ```rust
//! use lexbuf::{Chunked, Lexer};
//!
//! let mut lexer = Lexer::new(Chunked::new([&b"let x"[..], b" = 1;"]));
//! while lexer.peek(0).is_ascii_alphabetic() {
//!     lexer.move_by(1);
//! }
//! assert_eq!(lexer.shift(), b"let");
//! lexer.release();
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod chunk_utils;
mod error;
mod lexer;
mod options;
mod pool;
mod source;
pub mod utf8;

#[cfg(test)]
mod tests;

#[doc(hidden)]
pub use chunk_utils::split_chunks;
pub use error::LexerError;
pub use lexer::Lexer;
pub use options::{DEFAULT_BUFFER_SIZE, LexerOptions};
pub use pool::{BufferPool, PoolStats};
#[cfg(feature = "std")]
pub use source::ReadSource;
pub use source::{Chunked, Source};
pub use utf8::Rune;
