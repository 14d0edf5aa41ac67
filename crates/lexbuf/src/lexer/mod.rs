//! Lexer: lookahead, rewind and commit over a byte stream.
//!
//! Offsets
//! - `start` is where the current token begins, `pos` is the scan cursor.
//!   Both are indices into the active buffer, so they are renumbered whenever
//!   the buffer is exchanged. `base` tracks the stream offset of index 0.
//! - The active buffer is zeroed to its full capacity once and then refilled
//!   in place; `end` marks how much of it holds stream bytes.
//! - Bytes before `start` are committed. They stay in memory until the caller
//!   reports them consumed through [`Lexer::free`].
//!
//! Refill
//! - A peek past the buffered data first tops up the active buffer if the
//!   target still fits its capacity. Otherwise the buffer is exchanged with
//!   the pool for one large enough, carrying the uncommitted bytes
//!   `start..len` to its front. Capacity grows geometrically once a token
//!   spans more than half of it.
//! - The first read that yields nothing marks the stream exhausted. Source
//!   errors are sticky the same way.

use alloc::vec::Vec;
use core::{fmt, mem};

use bstr::BStr;
use log::{debug, trace};

use crate::{
    BufferPool, LexerError, LexerOptions, Source,
    utf8::{self, Rune},
};


/// Largest index a `Vec<u8>` can address.
const MAX_INDEX: usize = isize::MAX.unsigned_abs();

/// Streaming cursor over a [`Source`].
///
/// Tokenizers drive it by peeking ahead, moving the cursor, and then either
/// committing the bytes as a token ([`shift`](Lexer::shift)) or dropping them
/// ([`skip`](Lexer::skip)). Peeks never fail: past the end of the stream they
/// return `0`, and [`err`](Lexer::err) tells a real zero byte from
/// exhaustion.
///
/// Committed bytes are retained until reported consumed, typically with
/// [`release`](Lexer::release) after each token has been handled.
pub struct Lexer<S> {
    source: S,
    err: Option<LexerError>,

    pool: BufferPool,

    buf: Vec<u8>,
    end: usize,
    start: usize,
    pos: usize,
    prev_start: usize,
    // committed in retired buffers, not yet returned by `shift_len`
    unreported: usize,
    base: usize,
}

impl<S: Source> Lexer<S> {
    /// Create a lexer with the default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    /// Create a lexer with an estimated buffer size.
    pub fn with_capacity(source: S, buffer_size: usize) -> Self {
        Self::with_options(
            source,
            LexerOptions {
                buffer_size,
                ..LexerOptions::default()
            },
        )
    }

    /// Create a lexer with explicit options.
    ///
    /// Unless the source's whole content is adopted, this performs the first
    /// read.
    pub fn with_options(mut source: S, options: LexerOptions) -> Self {
        if options.adopt_source_bytes {
            if let Some(buf) = source.take_all() {
                debug!("lexer: adopted {} bytes from source", buf.len());
                return Self::from_parts(source, buf, Some(LexerError::Eof));
            }
        }
        let buf = Vec::with_capacity(options.buffer_size.max(1));
        let mut lexer = Self::from_parts(source, buf, None);
        lexer.peek(0);
        lexer
    }

    /// Returns the byte `offset` positions after the cursor.
    ///
    /// Reads from the source when the byte is not buffered yet. Returns `0`
    /// when the stream ends (or fails) first; check [`err`](Lexer::err).
    /// An offset too large for any buffer also returns `0`, without reading.
    pub fn peek(&mut self, offset: usize) -> u8 {
        let at = match self.pos.checked_add(offset) {
            Some(at) if at < MAX_INDEX => at,
            // no buffer can hold this index
            _ => return 0,
        };
        if at < self.end {
            return self.buf[at];
        }
        self.fill(at - self.start)
    }

    /// Decodes the codepoint starting `offset` bytes after the cursor.
    ///
    /// Decoding is best-effort and never fails; see [`utf8`].
    pub fn peek_codepoint(&mut self, offset: usize) -> Rune {
        utf8::decode(|i| self.peek(offset.saturating_add(i)))
    }

    /// Buffers the byte `ahead` positions after `start`, refilling as often as
    /// the source keeps producing.
    fn fill(&mut self, ahead: usize) -> u8 {
        loop {
            let at = self.start + ahead;
            if at < self.end {
                return self.buf[at];
            }
            if self.err.is_some() {
                return 0;
            }
            self.refill(at);
        }
    }

    fn refill(&mut self, at: usize) {
        let capacity = self.buf.capacity();
        if at < capacity {
            trace!("lexer: topping up {} of {capacity} bytes", self.end);
            self.read_more();
            return;
        }

        let ahead = at - self.start;
        let mut target = capacity.max(ahead + 1);
        if ahead.saturating_mul(2) > capacity {
            target = capacity
                .saturating_mul(2)
                .saturating_add(ahead)
                .min(MAX_INDEX);
            debug!("lexer: growing buffer from {capacity} to {target} bytes");
        }
        trace!(
            "lexer: swapping buffer at offset {}, carrying {} bytes",
            self.base + self.start,
            self.end - self.start
        );
        let mut retired = mem::take(&mut self.buf);
        retired.truncate(self.end);
        self.buf = self.pool.swap_carrying(retired, self.start, target);
        self.end = self.buf.len();
        self.rebase();
        self.read_more();
    }

    /// Reads once into the spare capacity of the active buffer.
    fn read_more(&mut self) {
        let end = self.end;
        if self.buf.len() < self.buf.capacity() {
            // once per buffer; later top-ups read straight into it
            self.buf.resize(self.buf.capacity(), 0);
        }
        let n = match self.source.read(&mut self.buf[end..]) {
            Ok(n) => n.min(self.buf.len() - end),
            Err(err) => {
                debug!("lexer: source failed at offset {}: {err}", self.base + end);
                self.err = Some(err);
                0
            }
        };
        self.end = end + n;
        trace!("lexer: read {n} bytes");
        if n == 0 && self.err.is_none() {
            debug!("lexer: end of stream at offset {}", self.base + end);
            self.err = Some(LexerError::Eof);
        }
    }
}

impl<S> Lexer<S> {
    fn from_parts(source: S, buf: Vec<u8>, err: Option<LexerError>) -> Self {
        Self {
            source,
            err,
            pool: BufferPool::new(),
            end: buf.len(),
            buf,
            start: 0,
            pos: 0,
            prev_start: 0,
            unreported: 0,
            base: 0,
        }
    }

    /// Moves index 0 of the active buffer to the current token start.
    fn rebase(&mut self) {
        let start = self.start;
        self.base += start;
        self.unreported += start - self.prev_start;
        self.prev_start = 0;
        self.pos -= start;
        self.start = 0;
    }

    /// The terminal source condition, once the cursor has reached it.
    ///
    /// Stays `None` while buffered bytes remain ahead of the cursor, even if
    /// the source has already ended or failed.
    pub fn err(&self) -> Option<&LexerError> {
        if self.pos < self.end {
            return None;
        }
        self.err.as_ref()
    }

    /// Whether the source has ended or failed, regardless of what is still
    /// buffered.
    pub fn is_exhausted(&self) -> bool {
        self.err.is_some()
    }

    /// Moves the cursor by `n` bytes in either direction without committing
    /// anything.
    ///
    /// The cursor stays between the token start and the end of the buffered
    /// data; peek far enough first to move past what is buffered.
    pub fn move_by(&mut self, n: isize) {
        self.pos = self
            .pos
            .saturating_add_signed(n)
            .clamp(self.start, self.end);
    }

    /// Position of the cursor relative to the token start.
    ///
    /// Valid for [`rewind`](Lexer::rewind) until the token is shifted or
    /// skipped.
    pub fn mark(&self) -> usize {
        self.pos - self.start
    }

    /// Restores a position returned by [`mark`](Lexer::mark).
    pub fn rewind(&mut self, mark: usize) {
        self.pos = self.start.saturating_add(mark).min(self.end);
    }

    /// The bytes between the token start and the cursor.
    pub fn lexeme(&self) -> &[u8] {
        &self.buf[self.start..self.pos]
    }

    /// [`lexeme`](Lexer::lexeme) as a byte string, for display.
    pub fn lexeme_bstr(&self) -> &BStr {
        BStr::new(self.lexeme())
    }

    /// Returns the current lexeme and commits it.
    pub fn shift(&mut self) -> &[u8] {
        let start = mem::replace(&mut self.start, self.pos);
        &self.buf[start..self.pos]
    }

    /// Commits the current lexeme without returning it.
    pub fn skip(&mut self) {
        self.start = self.pos;
    }

    /// Bytes committed since the last call, across shifts, skips and
    /// refills. Intended for [`free`](Lexer::free).
    pub fn shift_len(&mut self) -> usize {
        let n = self.unreported + self.start - self.prev_start;
        self.unreported = 0;
        self.prev_start = self.start;
        n
    }

    /// Reports `n` committed bytes as consumed, letting the pool recycle
    /// buffers that are fully drained.
    pub fn free(&mut self, n: usize) {
        self.pool.free(n);
    }

    /// Reports everything committed so far as consumed.
    pub fn release(&mut self) {
        let n = self.shift_len();
        self.free(n);
    }

    /// Stream offset of the cursor.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Stream offset of the token start.
    pub fn token_offset(&self) -> usize {
        self.base + self.start
    }

    /// Capacity of the active buffer.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The pool holding retired buffers.
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> fmt::Debug for Lexer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("offset", &self.offset())
            .field("lexeme", &self.lexeme_bstr())
            .field("ahead", &BStr::new(&self.buf[self.pos..self.end]))
            .field("err", &self.err)
            .field("pool", &self.pool.stats())
            .finish_non_exhaustive()
    }
}
