//! Byte sources a [`Lexer`](crate::Lexer) can pull from.

use alloc::{collections::VecDeque, vec::Vec};
use core::mem;

use crate::LexerError;

/// Abstract byte source, essentially [`std::io::Read`] that also works in
/// `no_std` builds.
///
/// Implemented for <code>&\[[u8]\]</code>, [`Vec<u8>`], [`Chunked`] and,
/// with the `std` feature, [`ReadSource`].
pub trait Source {
    /// Reads up to `buf.len()` bytes into the front of `buf`, returning how
    /// many were written. `Ok(0)` means end of stream.
    ///
    /// May block; the lexer treats the call as opaque.
    ///
    /// # Errors
    /// When the underlying source fails. The lexer records the error and
    /// stops reading.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LexerError>;

    /// Hands over the entire remaining content, if it is already in memory.
    ///
    /// Returning `Some` lets the lexer skip buffering altogether. The
    /// returned vector becomes the lexer's buffer as is, so a source that
    /// already owns its bytes hands them over without copying.
    fn take_all(&mut self) -> Option<Vec<u8>> {
        None
    }
}

/// A borrowed slice cannot be adopted in place: `take_all` copies it once
/// into an owned buffer. Pass a [`Vec<u8>`] to skip the copy.
impl Source for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LexerError> {
        let n = buf.len().min(self.len());
        let (head, rest) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = rest;
        Ok(n)
    }

    fn take_all(&mut self) -> Option<Vec<u8>> {
        Some(mem::take(self).to_vec())
    }
}

/// `take_all` moves the vector itself into the lexer; nothing is copied.
impl Source for Vec<u8> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LexerError> {
        let n = buf.len().min(self.len());
        buf[..n].copy_from_slice(&self[..n]);
        self.drain(..n);
        Ok(n)
    }

    fn take_all(&mut self) -> Option<Vec<u8>> {
        Some(mem::take(self))
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LexerError> {
        (**self).read(buf)
    }

    fn take_all(&mut self) -> Option<Vec<u8>> {
        (**self).take_all()
    }
}

/// A source that yields a fixed sequence of chunks, at most one per read.
///
/// Models a network stream where each read returns whatever arrived. A chunk
/// larger than the caller's buffer is split across reads; empty chunks are
/// skipped. Never hands over its content up front.
#[derive(Debug, Clone, Default)]
pub struct Chunked<'a> {
    chunks: VecDeque<&'a [u8]>,
    failure: Option<&'static str>,
    reads: usize,
}

impl<'a> Chunked<'a> {
    /// Create a source yielding `chunks` in order, then end of stream.
    pub fn new(chunks: impl IntoIterator<Item = &'a [u8]>) -> Self {
        Self {
            chunks: chunks.into_iter().filter(|c| !c.is_empty()).collect(),
            failure: None,
            reads: 0,
        }
    }

    /// Fail with [`LexerError::Source`] instead of reporting end of stream.
    #[must_use]
    pub fn fail_with(mut self, message: &'static str) -> Self {
        self.failure = Some(message);
        self
    }

    /// Number of read calls served so far, including the final one.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Source for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LexerError> {
        self.reads += 1;
        let Some(chunk) = self.chunks.pop_front() else {
            return match self.failure {
                Some(message) => Err(LexerError::Source(message)),
                None => Ok(0),
            };
        };
        let n = buf.len().min(chunk.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.chunks.push_front(&chunk[n..]);
        }
        Ok(n)
    }
}

/// Input from a [`std::io::Read`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
}

#[cfg(feature = "std")]
impl<R> ReadSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Source for ReadSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LexerError> {
        loop {
            match self.reader.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(LexerError::Io(e)),
            }
        }
    }
}
