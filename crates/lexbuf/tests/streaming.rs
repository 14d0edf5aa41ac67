#![expect(missing_docs)]

use std::io::{self, Cursor, Read};

use lexbuf::{Chunked, Lexer, LexerError, LexerOptions, ReadSource};
use rstest::rstest;

mod common;

use common::{Entry, entries, joined};

fn expected() -> Vec<Entry> {
    let entry = |offset, key: &str, value: &str| Entry {
        offset,
        key: key.to_owned(),
        value: value.to_owned(),
    };
    vec![
        entry(13, "name", "lexbuf"),
        entry(29, "workers", "16"),
        entry(62, "timeout", "2500"),
    ]
}

#[test_log::test]
fn parses_chunked_stream() {
    let stream: Vec<&[u8]> = common::STREAM.iter().map(|s| s.as_bytes()).collect();
    let mut lexer = Lexer::with_capacity(Chunked::new(stream), 8);
    assert_eq!(entries(&mut lexer), expected());
    assert_eq!(lexer.offset(), joined().len());
    assert_eq!(lexer.err(), Some(&LexerError::Eof));
    assert_eq!(lexer.pool().stats().in_flight, 0);
}

#[rstest]
#[case::whole(1)]
#[case::halves(2)]
#[case::bytewise(usize::MAX)]
fn chunking_does_not_change_entries(#[case] parts: usize, #[values(1, 4, 4096)] size: usize) {
    let data = joined();
    let parts = parts.min(data.len());
    let mut lexer = Lexer::with_capacity(Chunked::new(lexbuf::split_chunks(&data, parts)), size);
    assert_eq!(entries(&mut lexer), expected());
}

#[test]
fn parses_from_a_reader() {
    let mut lexer = Lexer::with_capacity(ReadSource::new(Cursor::new(joined())), 16);
    assert_eq!(entries(&mut lexer), expected());
    assert_eq!(lexer.offset(), joined().len());
    assert!(lexer.err().is_some_and(LexerError::is_eof));
}

#[test]
fn adopted_bytes_need_no_reads() {
    let data = joined();
    let mut lexer = Lexer::new(data.as_slice());
    assert!(lexer.is_exhausted());
    assert_eq!(entries(&mut lexer), expected());
    assert!(lexer.pool().is_empty(), "an adopted buffer is never exchanged");
}

/// Yields `data`, then fails instead of ending.
struct Truncated {
    data: Cursor<Vec<u8>>,
}

impl Read for Truncated {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::ErrorKind::ConnectionAborted.into()),
            n => Ok(n),
        }
    }
}

#[test_log::test]
fn reader_failures_surface_after_buffered_bytes() {
    let mut lexer = Lexer::with_options(
        ReadSource::new(Truncated {
            data: Cursor::new(b"key = va".to_vec()),
        }),
        LexerOptions {
            buffer_size: 4,
            adopt_source_bytes: false,
        },
    );

    while lexer.peek(0) != 0 {
        lexer.move_by(1);
    }
    assert!(lexer.is_exhausted());
    assert_eq!(lexer.shift(), b"key = va");

    let err = lexer.err().expect("the reader failed");
    assert!(!err.is_eof());
    assert!(matches!(err, LexerError::Io(e) if e.kind() == io::ErrorKind::ConnectionAborted));
    assert_eq!(err.to_string(), io::Error::from(io::ErrorKind::ConnectionAborted).to_string());
}
