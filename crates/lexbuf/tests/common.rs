#![allow(missing_docs)]
#![allow(dead_code)]

use lexbuf::{Lexer, Source};

/// A settings file as a network reader might deliver it, split mid-token.
pub const STREAM: &[&str] = &[
    "# dep",
    "loyment\nname = \"le",
    "xbuf\"\nworkers = 1",
    "6\n\n# trailing ",
    "comment\ntimeout",
    " = 2500\n",
];

pub fn joined() -> Vec<u8> {
    STREAM.concat().into_bytes()
}

/// One `key = value` pair, with the stream offset where the key starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub offset: usize,
    pub key: String,
    pub value: String,
}

/// Parses `key = value` lines, skipping comments and blank lines. Values are
/// either bare words or double-quoted strings; quotes are dropped.
pub fn entries<S: Source>(lexer: &mut Lexer<S>) -> Vec<Entry> {
    let mut out = Vec::new();
    loop {
        skip_blank(lexer);
        match lexer.peek(0) {
            0 if lexer.err().is_some() => break,
            b'#' => {
                while !matches!(lexer.peek(0), b'\n' | 0) {
                    lexer.move_by(1);
                }
                lexer.skip();
            }
            _ => {
                let offset = lexer.token_offset();
                let key = word(lexer);
                skip_blank(lexer);
                assert_eq!(lexer.peek(0), b'=', "expected `=` after {key}");
                lexer.move_by(1);
                lexer.skip();
                skip_blank(lexer);
                let value = if lexer.peek(0) == b'"' {
                    quoted(lexer)
                } else {
                    word(lexer)
                };
                out.push(Entry { offset, key, value });
            }
        }
        lexer.release();
    }
    out
}

fn skip_blank<S: Source>(lexer: &mut Lexer<S>) {
    while lexer.peek(0).is_ascii_whitespace() {
        lexer.move_by(1);
    }
    lexer.skip();
}

fn word<S: Source>(lexer: &mut Lexer<S>) -> String {
    while lexer.peek(0).is_ascii_alphanumeric() {
        lexer.move_by(1);
    }
    String::from_utf8_lossy(lexer.shift()).into_owned()
}

fn quoted<S: Source>(lexer: &mut Lexer<S>) -> String {
    lexer.move_by(1);
    lexer.skip();
    while !matches!(lexer.peek(0), b'"' | 0) {
        lexer.move_by(1);
    }
    let value = String::from_utf8_lossy(lexer.shift()).into_owned();
    lexer.move_by(1);
    lexer.skip();
    value
}
