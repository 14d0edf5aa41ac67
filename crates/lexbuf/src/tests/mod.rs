use alloc::vec::Vec;

use crate::{Lexer, Source};


/// Cuts `payload` at positions derived from `splits`, the way a reader might
/// receive it. Every chunk is at least one byte.
pub(crate) fn cut_at<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for split in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + split % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// Whitespace-separated words, released after every token.
pub(crate) fn words<S: Source>(lexer: &mut Lexer<S>) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        while lexer.peek(0).is_ascii_whitespace() {
            lexer.move_by(1);
        }
        lexer.skip();
        if lexer.peek(0) == 0 && lexer.err().is_some() {
            break;
        }
        while !lexer.peek(0).is_ascii_whitespace() && lexer.err().is_none() {
            lexer.move_by(1);
        }
        out.push(lexer.shift().to_vec());
        lexer.release();
    }
    out
}
